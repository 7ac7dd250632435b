//! `chorus quota` handler.

use chorus_bot::BotConfig;
use chorus_error::ChorusResult;
use chorus_rate_limit::Endpoint;
use chorus_social::{HttpTransport, TwitterClient};
use std::path::Path;

/// Print the quota of every endpoint the bot polls.
pub async fn show_quota(config_path: Option<&Path>) -> ChorusResult<()> {
    let config = BotConfig::load_with(config_path)?;
    let client = TwitterClient::new(HttpTransport::new(config.api.clone())?);

    let endpoints = [Endpoint::FollowersIds, Endpoint::UsersLookup];
    let families: Vec<&str> = endpoints.iter().map(Endpoint::family).collect();
    let (quota, _) = client.rate_limit_status(&families).await?;

    for endpoint in endpoints {
        match quota.get(endpoint.family(), endpoint.path()) {
            Some(status) => println!(
                "{:<16} {:>5}/{:<5} resets {}",
                endpoint.path(),
                status.remaining(),
                status.limit(),
                status.reset_time()
            ),
            None => println!("{:<16} not reported", endpoint.path()),
        }
    }
    Ok(())
}
