//! `chorus config` handler.

use chorus_bot::BotConfig;
use chorus_error::{ChorusResult, ConfigError};
use std::path::Path;

const REDACTED: &str = "<redacted>";

/// Render the effective configuration with the bearer token masked.
pub fn render_config(config: &BotConfig) -> ChorusResult<String> {
    let mut shown = config.clone();
    if shown.api.bearer_token().is_some() {
        shown.override_bearer_token(Some(REDACTED.to_string()));
    }
    Ok(toml::to_string_pretty(&shown).map_err(|e| {
        ConfigError::new(format!("Failed to render configuration: {}", e))
    })?)
}

/// Print the effective configuration.
pub fn show_config(config_path: Option<&Path>) -> ChorusResult<()> {
    let config = BotConfig::load_with(config_path)?;
    print!("{}", render_config(&config)?);
    Ok(())
}
