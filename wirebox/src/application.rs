//! Core application bootstrapping functionality.

use crate::config::{
    ApplicationConfig, ConfigurationError, ConfigurationSource, CONFIG_ENV_PREFIX, CONFIG_FILE,
};
use thiserror::Error;
use tracing::info;
use wirebox_di::provider::ServiceProvider;
use wirebox_di::service_registry::ServiceCollection;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Configuration error during bootstrap: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Owner of the setup phase. An `Application` holds the configuration source
/// and the mutable service collection while registrations are applied in
/// sequence, and [start](Self::start) then freezes the collection into a
/// read-only [ServiceProvider] for the resolution phase.
pub struct Application {
    configuration: ConfigurationSource,
    services: ServiceCollection,
}

impl Application {
    pub fn new(configuration: ConfigurationSource) -> Self {
        Self {
            configuration,
            services: ServiceCollection::new(),
        }
    }

    /// Returns the configuration source for this application.
    pub fn configuration(&self) -> &ConfigurationSource {
        &self.configuration
    }

    /// Returns the mutable service collection. Only valid during the setup
    /// phase, before [start](Self::start).
    pub fn services(&mut self) -> &mut ServiceCollection {
        &mut self.services
    }

    /// Applies a registration callback with access to both the
    /// configuration source and the service collection.
    pub fn configure_services<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&ConfigurationSource, &mut ServiceCollection),
    {
        configure(&self.configuration, &mut self.services);
        self
    }

    /// Ends the setup phase and builds the [ServiceProvider].
    pub fn start(self) -> ServiceProvider {
        info!(
            "Starting application with {} service registrations.",
            self.services.len()
        );

        self.services.build()
    }
}

/// Creates an [Application] with the default configuration sources
/// ([CONFIG_FILE] and `WIREBOX_`-prefixed environment variables) and
/// installs the tracing logger when [ApplicationConfig] says so.
pub fn create_default() -> Result<Application, BootstrapError> {
    let application_config = ApplicationConfig::init_from_environment()?;
    if application_config.install_tracing_logger {
        install_tracing_logger();
    }

    let configuration = ConfigurationSource::builder()
        .with_file(CONFIG_FILE)
        .with_env_prefix(CONFIG_ENV_PREFIX)
        .build()?;

    Ok(Application::new(configuration))
}

fn install_tracing_logger() {
    // a logger may already be installed, e.g. by tests or a re-entrant
    // bootstrap - keep the existing one in that case
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
