//! Follower-timeline assembly.
//!
//! This crate turns an account's follower list into a merged, time-ordered
//! feed of the followers' latest posts:
//!
//! - [`TwitterClient`] sends requests through a [`Transport`](chorus_interface::Transport)
//!   and decodes the typed payloads
//! - [`FollowerIdFetcher`] paginates `followers/ids` behind an [`IdCache`](chorus_cache::IdCache)
//! - [`BatchLookupFetcher`] resolves up to 100 ids per `users/lookup` call
//!   and keeps posts newer than a cutoff
//! - [`TimelineAssembler`] fans batches out to a bounded worker pool and
//!   fans the results back in, all-or-nothing
//! - [`HttpTransport`] is the reqwest-backed transport used in production
//!
//! # Example
//!
//! ```rust,ignore
//! use chorus_social::{HttpTransport, HttpTransportConfig, TwitterClient};
//!
//! let transport = HttpTransport::new(HttpTransportConfig::default())?;
//! let client = TwitterClient::new(transport);
//! let (quota, _) = client.rate_limit_status(&["users"]).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod client;
mod followers;
mod http;
mod lookup;

pub use assembler::{AssemblerConfig, AssemblerConfigBuilder, TimelineAssembler};
pub use client::TwitterClient;
pub use followers::{FOLLOWER_PAGE_SIZE, FollowerIdFetcher};
pub use http::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder};
pub use lookup::{BatchLookupFetcher, MAX_LOOKUP_IDS};
