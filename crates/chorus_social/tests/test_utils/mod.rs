//! Test utilities for Chorus social tests.
//!
//! This module provides a scripted transport and payload builders.

#![allow(dead_code)]

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{
    MockTransport, follower_page, lookup_route, minutes_ago, quota, user_with_post,
};
