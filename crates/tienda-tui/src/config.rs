//! Configuration: TOML file merged with `TIENDA_`-prefixed env vars.
//!
//! Priority (low to high): built-in defaults → config file → environment.
//! CLI flags override on top of this in `main`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tienda_api::TransportConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Catalog API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000/api".into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Validate the URL field and build the matching transport config.
    pub fn transport(&self) -> Result<TransportConfig, ConfigError> {
        let _: url::Url = self.api_url.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", self.api_url),
        })?;
        Ok(TransportConfig {
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tienda", "tienda").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("tienda");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load the full Config from defaults + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("TIENDA_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url, "http://127.0.0.1:8000/api");
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.transport().is_ok());
    }

    #[test]
    fn file_values_override_defaults_field_by_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"http://10.0.0.5:8000/api\"\n").expect("write config");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract()
            .expect("extract");

        assert_eq!(config.api_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.timeout_secs, 30, "unset fields keep their defaults");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let cfg = Config {
            api_url: "not a url".into(),
            timeout_secs: 30,
        };
        assert!(matches!(
            cfg.transport(),
            Err(ConfigError::Validation { .. })
        ));
    }
}
