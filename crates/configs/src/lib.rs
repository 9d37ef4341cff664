//! circlet/crates/configs/src/lib.rs
//!
//! Layered configuration for the Circlet binaries: built-in defaults, an
//! optional `circlet.toml` next to the working directory, then environment
//! variables prefixed `CIRCLET_` (e.g. `CIRCLET_SEED__USERS=20`).

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// An `EnvFilter` directive string, e.g. "info" or "services=debug".
    #[serde(default = "LogConfig::default_filter")]
    pub filter: String,
}

impl LogConfig {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
        }
    }
}

/// Shape of the demo dataset the seed tool generates.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "SeedConfig::default_users")]
    pub users: usize,
    #[serde(default = "SeedConfig::default_circles")]
    pub circles: usize,
    #[serde(default = "SeedConfig::default_posts_per_circle")]
    pub posts_per_circle: usize,
    #[serde(default = "SeedConfig::default_comments_per_post")]
    pub comments_per_post: usize,
    /// Where to write the JSON dump; stdout when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl SeedConfig {
    fn default_users() -> usize {
        8
    }

    fn default_circles() -> usize {
        3
    }

    fn default_posts_per_circle() -> usize {
        4
    }

    fn default_comments_per_post() -> usize {
        3
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: Self::default_users(),
            circles: Self::default_circles(),
            posts_per_circle: Self::default_posts_per_circle(),
            comments_per_post: Self::default_comments_per_post(),
            output: None,
        }
    }
}

impl AppConfig {
    /// Loads defaults < `circlet.toml` < `CIRCLET_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // .env is a local-development convenience only.
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("circlet").required(false))
            .add_source(
                Environment::with_prefix("CIRCLET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<AppConfig>()?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_apply_without_sources() {
        let config = Config::builder()
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.seed.users, 8);
        assert!(config.seed.output.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = Config::builder()
            .add_source(File::from_str(
                "[seed]\nusers = 20\n[log]\nfilter = \"debug\"",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();
        assert_eq!(config.seed.users, 20);
        assert_eq!(config.log.filter, "debug");
        // Untouched sections keep their defaults.
        assert_eq!(config.seed.circles, 3);
    }
}
