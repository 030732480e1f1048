//! Configuration support for the hosting layer.
//!
//! A [ConfigurationSource] supplies string key/value pairs through a
//! section/key lookup and is consumed during the setup phase, typically to
//! build fixed options values. By default, values come from an optional
//! `wirebox.json` file and environment variables prefixed with `WIREBOX_`,
//! with programmatic overrides on top.

use config::{Config, ConfigError, Environment, File};
use derive_more::Constructor;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_ENV_PREFIX: &str = "WIREBOX";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "wirebox.json";

/// Errors related to building and reading configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Error reading configuration: {0}")]
    Source(#[from] ConfigError),
}

/// A built configuration source yielding string values by section and key.
#[derive(Clone, Debug)]
pub struct ConfigurationSource {
    config: Config,
}

impl ConfigurationSource {
    /// Creates an empty builder. Sources are queried in reverse addition
    /// order, with programmatic overrides taking precedence over all of
    /// them.
    pub fn builder() -> ConfigurationSourceBuilder {
        ConfigurationSourceBuilder {
            builder: Config::builder(),
        }
    }

    /// Returns a view over the values under the given section.
    pub fn section<'a>(&'a self, name: &'a str) -> ConfigurationSection<'a> {
        ConfigurationSection::new(self, name)
    }
}

/// A view over a single section of a [ConfigurationSource].
#[derive(Clone, Copy, Debug, Constructor)]
pub struct ConfigurationSection<'a> {
    source: &'a ConfigurationSource,
    name: &'a str,
}

impl ConfigurationSection<'_> {
    /// Returns the string value stored under the given key, or `None` when
    /// the key is absent. A missing key is not an error.
    pub fn get(&self, key: &str) -> Option<String> {
        self.source
            .config
            .get_string(&format!("{}.{}", self.name, key))
            .ok()
    }

    /// Deserializes the whole section into a typed value.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, ConfigurationError> {
        self.source.config.get(self.name).map_err(Into::into)
    }
}

/// Builder for [ConfigurationSource].
pub struct ConfigurationSourceBuilder {
    builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigurationSourceBuilder {
    /// Adds an optional file source with the given name.
    pub fn with_file(mut self, name: &str) -> Self {
        self.builder = self.builder.add_source(File::with_name(name).required(false));
        self
    }

    /// Adds an environment variable source with the given prefix.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.builder = self.builder.add_source(Environment::with_prefix(prefix));
        self
    }

    /// Sets a programmatic override for the given `section.key` path.
    pub fn with_override<V: Into<config::Value>>(
        mut self,
        key: &str,
        value: V,
    ) -> Result<Self, ConfigurationError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Builds the resulting [ConfigurationSource].
    pub fn build(self) -> Result<ConfigurationSource, ConfigurationError> {
        Ok(ConfigurationSource {
            config: self.builder.build()?,
        })
    }
}

/// Hosting configuration used when bootstrapping with
/// [create_default](crate::application::create_default).
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct ApplicationConfig {
    /// Should a default tracing logger be installed in the scope of the
    /// application.
    pub install_tracing_logger: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
        }
    }
}

impl From<OptionalApplicationConfig> for ApplicationConfig {
    fn from(value: OptionalApplicationConfig) -> Self {
        let default = Self::default();
        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
        }
    }
}

impl ApplicationConfig {
    pub(crate) fn init_from_environment() -> Result<Self, ConfigurationError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalApplicationConfig>())
            .map(|config| config.into())
            .map_err(Into::into)
    }
}

#[derive(Deserialize)]
struct OptionalApplicationConfig {
    install_tracing_logger: Option<bool>,
}
