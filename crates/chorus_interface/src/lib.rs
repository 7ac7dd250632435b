//! Trait definitions for the Chorus follower-timeline bot.
//!
//! This crate defines the seams between the timeline pipeline and its
//! collaborators: the HTTP transport that talks to the API and the reaction
//! capability invoked for each qualifying post.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{Reaction, Transport};
pub use types::{ApiRequest, ApiResponse, HttpMethod};
