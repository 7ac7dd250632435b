//! Logical API endpoints with separate quotas.

/// An endpoint whose quota is tracked on its own.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
)]
pub enum Endpoint {
    /// `GET followers/ids`
    #[strum(to_string = "followers/ids")]
    FollowersIds,
    /// `POST users/lookup`
    #[strum(to_string = "users/lookup")]
    UsersLookup,
    /// `GET application/rate_limit_status`
    #[strum(to_string = "application/rate_limit_status")]
    RateLimitStatus,
}

impl Endpoint {
    /// Request path relative to the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FollowersIds => "/followers/ids",
            Endpoint::UsersLookup => "/users/lookup",
            Endpoint::RateLimitStatus => "/application/rate_limit_status",
        }
    }

    /// Resource family the endpoint is grouped under in quota reports.
    pub fn family(&self) -> &'static str {
        match self {
            Endpoint::FollowersIds => "followers",
            Endpoint::UsersLookup => "users",
            Endpoint::RateLimitStatus => "application",
        }
    }
}
