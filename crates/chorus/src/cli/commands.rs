//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chorus - react to the latest posts of an account's followers
#[derive(Parser, Debug)]
#[command(name = "chorus")]
#[command(about = "React to the latest posts of an account's followers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll an account's followers and react to new posts
    Run {
        /// Numeric id of the account whose followers are polled
        #[arg(long)]
        account: u64,

        /// Extra configuration file, applied over ./chorus.toml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run a single round and print it instead of looping
        #[arg(long)]
        once: bool,
    },

    /// Print the current quota for the polled endpoints
    Quota {
        /// Extra configuration file, applied over ./chorus.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Extra configuration file, applied over ./chorus.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
