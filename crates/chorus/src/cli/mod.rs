//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the chorus binary.

mod commands;
mod config;
mod quota;
mod run;

pub use commands::{Cli, Commands};
pub use config::show_config;
pub use quota::show_quota;
pub use run::run_bot;
