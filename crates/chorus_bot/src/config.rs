//! Layered bot configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (chorus.toml shipped with the crate)
//! 2. `~/.config/chorus/chorus.toml`
//! 3. `./chorus.toml`
//! 4. An explicit file, when given
//! 5. `CHORUS_*` environment variables (`CHORUS_API__TIMEOUT_SECS=10`)
//!
//! `CHORUS_BEARER_TOKEN` is applied last as a shorthand for
//! `CHORUS_API__BEARER_TOKEN`.

use crate::KeywordRule;
use chorus_cache::IdCacheConfig;
use chorus_error::{ChorusError, ChorusResult, ConfigError};
use chorus_social::{AssemblerConfig, HttpTransportConfig};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Environment variable holding the API bearer token.
pub const BEARER_TOKEN_ENV: &str = "CHORUS_BEARER_TOKEN";

const DEFAULT_CONFIG: &str = include_str!("../../../chorus.toml");

/// Top-level Chorus configuration.
///
/// # Example
///
/// ```toml
/// [api]
/// timeout_secs = 10
///
/// [assembler]
/// workers = 8
///
/// [[reactions]]
/// keyword = "launch"
/// reply = "Congrats @{author}!"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// HTTP transport settings
    #[serde(default)]
    pub api: HttpTransportConfig,

    /// Follower-id cache settings
    #[serde(default)]
    pub cache: IdCacheConfig,

    /// Lookup worker pool settings
    #[serde(default)]
    pub assembler: AssemblerConfig,

    /// Keyword reactions, tried in order
    #[serde(default)]
    pub reactions: Vec<KeywordRule>,
}

impl BotConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundled file does not parse.
    pub fn bundled() -> ChorusResult<Self> {
        build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Bundled defaults overlaid with one file. User files and the
    /// environment are not consulted.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing or malformed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ChorusResult<Self> {
        debug!("Loading configuration from file");
        build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref()).format(FileFormat::Toml)),
        )
    }

    /// Load every layer.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any present source is malformed.
    pub fn load() -> ChorusResult<Self> {
        Self::load_with(None)
    }

    /// Load every layer, adding `explicit` above the user files.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `explicit` is missing or any present
    /// source is malformed.
    #[instrument]
    pub fn load_with(explicit: Option<&Path>) -> ChorusResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/chorus/chorus.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("chorus").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("CHORUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config = build(builder)?;
        config.override_bearer_token(std::env::var(BEARER_TOKEN_ENV).ok());
        Ok(config)
    }

    /// Replace the bearer token when `token` is set and non-empty.
    pub fn override_bearer_token(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let api = std::mem::take(&mut self.api);
            self.api = api.with_bearer_token(token);
        }
    }
}

fn build(builder: ConfigBuilder<DefaultState>) -> ChorusResult<BotConfig> {
    builder
        .build()
        .map_err(|e| {
            ChorusError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            ChorusError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}
