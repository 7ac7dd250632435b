//! Error types for the Chorus workspace.
//!
//! This crate provides the foundation error types used by every Chorus crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use chorus_error::{ChorusResult, HttpError, HttpErrorKind};
//!
//! fn fetch_page() -> ChorusResult<String> {
//!     Err(HttpError::new(HttpErrorKind::Transport("Connection refused".into())))?
//! }
//!
//! match fetch_page() {
//!     Ok(page) => println!("Got: {}", page),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod task;
mod timestamp;
mod validation;

pub use config::ConfigError;
pub use error::{ChorusError, ChorusErrorKind, ChorusResult};
pub use http::{HttpError, HttpErrorKind};
pub use json::JsonError;
pub use task::TaskError;
pub use timestamp::TimestampError;
pub use validation::{ValidationError, ValidationErrorKind};
