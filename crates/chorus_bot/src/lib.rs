//! Polling loop for the Chorus follower-timeline bot.
//!
//! This crate ties the pieces together:
//! - [`BotConfig`] layers bundled defaults, user files and environment
//!   variables into one configuration
//! - [`KeywordReaction`] answers posts that mention configured keywords
//! - [`PollingLoop`] primes the quota baseline, assembles a timeline each
//!   round, dispatches reactions and sleeps an adaptive interval

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod polling;
mod reaction;

pub use config::{BEARER_TOKEN_ENV, BotConfig};
pub use polling::{
    PollingLoop, Reply, RoundReport, run_polling_loop, run_polling_loop_with_config,
};
pub use reaction::{KeywordReaction, KeywordRule};
