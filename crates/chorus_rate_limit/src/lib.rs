//! Quota tracking and adaptive poll pacing.
//!
//! The API reports a quota per endpoint: a request limit, the requests left,
//! and the epoch second at which the window resets. This crate keeps a
//! pessimistic view of those readings per polling round and turns the change
//! between rounds into a sleep duration that spreads the remaining quota
//! evenly over the time left in the window.
//!
//! ```
//! use chorus_core::RateLimitStatus;
//! use chorus_rate_limit::{Endpoint, RateLimitTracker};
//!
//! let tracker = RateLimitTracker::new();
//! tracker.record(Endpoint::UsersLookup, RateLimitStatus::new(180, 150, 1_700_000_900));
//! tracker.record(Endpoint::UsersLookup, RateLimitStatus::new(180, 170, 1_700_000_900));
//! assert_eq!(*tracker.current(Endpoint::UsersLookup).unwrap().remaining(), 150);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod detector;
mod endpoint;
mod pacing;
mod tracker;

pub use detector::{LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER, detect_rate_limit};
pub use endpoint::Endpoint;
pub use pacing::{MIN_WAIT_SECS, wait_seconds};
pub use tracker::RateLimitTracker;
