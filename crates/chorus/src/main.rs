//! Chorus CLI binary.
//!
//! - `chorus run --account <id>` polls an account's followers until a fatal
//!   error (or for one round with `--once`)
//! - `chorus quota` prints the current quota of the polled endpoints
//! - `chorus config` prints the merged configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_bot, show_config, show_quota};

    // Pick up CHORUS_BEARER_TOKEN and friends from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,chorus=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            account,
            config,
            once,
        } => {
            run_bot(account, config.as_deref(), once).await?;
        }

        Commands::Quota { config } => {
            show_quota(config.as_deref()).await?;
        }

        Commands::Config { config } => {
            show_config(config.as_deref())?;
        }
    }

    Ok(())
}
