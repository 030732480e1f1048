//! Registration helpers for services configured by an options value.
//!
//! Two provisioning strategies are supported. With
//! [register_fixed_options](OptionsRegistrationExt::register_fixed_options)
//! the options value is constructed by the caller before registration,
//! typically from a configuration lookup, and stored as a singleton. With
//! [register_options_factory](OptionsRegistrationExt::register_options_factory)
//! construction is deferred to a factory invoked with the active resolver,
//! so the options value can pull in other registered services (e.g. a
//! secrets store).

use crate::error::ServiceResolutionError;
use crate::instance_provider::{
    ServiceInstancePtr, ServiceInstanceProvider, TypedServiceInstanceProvider,
};
use crate::service_registry::ServiceCollection;

/// Extension trait adding options-aware registration to [ServiceCollection].
pub trait OptionsRegistrationExt {
    /// Registers the pre-built `options` value as a singleton together with
    /// a scoped dependent service built by `constructor` from the resolved
    /// options instance.
    ///
    /// Limitation: no resolver is available while the caller builds the
    /// options value, so the options cannot depend on any other registered
    /// service. When they do, use
    /// [register_options_factory](Self::register_options_factory) instead.
    fn register_fixed_options<O, S, C>(&mut self, options: O, constructor: C) -> &mut Self
    where
        O: Send + Sync + 'static,
        S: Send + Sync + 'static,
        C: Fn(ServiceInstancePtr<O>) -> S + Send + Sync + 'static;

    /// Registers the options type as a scoped service built by `factory`,
    /// which receives the active resolver and may look up any other
    /// registered service.
    ///
    /// The dependent service is not registered here - callers add it
    /// separately, after this registration, resolving the options type from
    /// the provider.
    fn register_options_factory<O, F>(&mut self, factory: F) -> &mut Self
    where
        O: Send + Sync + 'static,
        F: Fn(&mut dyn ServiceInstanceProvider) -> Result<O, ServiceResolutionError>
            + Send
            + Sync
            + 'static;
}

impl OptionsRegistrationExt for ServiceCollection {
    fn register_fixed_options<O, S, C>(&mut self, options: O, constructor: C) -> &mut Self
    where
        O: Send + Sync + 'static,
        S: Send + Sync + 'static,
        C: Fn(ServiceInstancePtr<O>) -> S + Send + Sync + 'static,
    {
        self.add_singleton_value(options)
            .add_scoped_factory(move |provider| {
                provider
                    .instance_typed::<O>()
                    .map(|options| constructor(options))
            })
    }

    fn register_options_factory<O, F>(&mut self, factory: F) -> &mut Self
    where
        O: Send + Sync + 'static,
        F: Fn(&mut dyn ServiceInstanceProvider) -> Result<O, ServiceResolutionError>
            + Send
            + Sync
            + 'static,
    {
        self.add_scoped_factory(factory)
    }
}
