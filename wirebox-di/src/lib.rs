//! Dependency injection container built on an ordered registry of service
//! descriptors.
//!
//! Services are registered into a [ServiceCollection](service_registry::ServiceCollection)
//! during a single-threaded setup phase, either as pre-built singleton values
//! or as factories invoked with the active resolver. The collection is then
//! frozen into a [ServiceProvider](provider::ServiceProvider), from which
//! [scopes](scope::ServiceScope) resolve instances on demand: singletons are
//! shared across all scopes, while scoped services are created once per
//! scope.
//!
//! The [options](crate::options) module contains helpers for the common case
//! of a service configured by an options value, covering both eager options
//! construction and deferring it to a factory which can resolve other
//! registered services.

pub mod error;
pub mod instance_provider;
pub mod options;
pub mod provider;
pub mod scope;
pub mod service_registry;
