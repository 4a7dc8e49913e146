//! Process-wide configuration loaded once at startup.
//!
//! Settings come from a YAML file, optionally overlaid with environment
//! variables such as `APP__GITHUB__TOKEN`. `main` builds the [`Config`] and
//! reads each typed section out of it; components receive only their section.

use std::path::{Path, PathBuf};

use config::{Config as RawConfig, Environment, File};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const ENV_SEPARATOR: &str = "__";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load or parse configuration")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug)]
pub struct Config {
    inner: RawConfig,
}

impl Config {
    pub fn builder<P: AsRef<Path>>(path: P) -> ConfigBuilder {
        ConfigBuilder::new(path.as_ref().to_path_buf())
    }

    /// Reads a single value or a whole section, e.g. `config.get::<ServerSettings>("server")`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.inner.get(key).map_err(ConfigError::from)
    }
}

/// The `server` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub address: String,
    pub timeout_secs: u64,
}

/// The `database` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

pub struct ConfigBuilder {
    path: PathBuf,
    env_prefix: Option<String>,
}

impl ConfigBuilder {
    fn new(path: PathBuf) -> Self {
        Self { path, env_prefix: None }
    }

    /// Lets `{prefix}__SECTION__KEY` environment variables override file values.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let env = self.env_prefix.as_deref().map(Self::environment);
        let inner = Self::load(&self.path, env)?;

        tracing::info!("Configuration loaded from {}", self.path.to_string_lossy());

        Ok(Config { inner })
    }

    fn environment(prefix: &str) -> Environment {
        Environment::with_prefix(prefix)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    fn load(path: &Path, env: Option<Environment>) -> Result<RawConfig, config::ConfigError> {
        let mut builder = RawConfig::builder().add_source(File::from(path).required(true));
        if let Some(env) = env {
            builder = builder.add_source(env);
        }
        builder.build()
    }
}
