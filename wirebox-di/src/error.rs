use crate::instance_provider::ErrorPtr;
use std::any::TypeId;
use thiserror::Error;

/// Errors related to resolving service instances.
#[derive(Error, Clone, Debug)]
pub enum ServiceResolutionError {
    #[error("No service registered for type {0:?}")]
    NoRegisteredService(TypeId),
    #[error("Tried to downcast service instance to incompatible type: {0:?}")]
    IncompatibleInstance(TypeId),
    #[error("Dependency cycle detected while constructing service {0:?}")]
    DependencyCycle(TypeId),
    #[error("Service factory failed: {0}")]
    FactoryFailure(ErrorPtr),
}
