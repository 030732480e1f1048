use crate::error::ServiceResolutionError;
#[cfg(test)]
use mockall::automock;
use std::any::{Any, TypeId};
use std::error::Error;
use std::sync::Arc;

/// Pointer wrapping a resolved service instance.
pub type ServiceInstancePtr<T> = Arc<T>;

/// Type-erased [ServiceInstancePtr].
pub type ServiceInstanceAnyPtr = Arc<dyn Any + Send + Sync + 'static>;

/// Type-erased error which can be returned by user-supplied service
/// factories.
pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Generic provider for service instances. Implemented by resolution scopes
/// and passed to every registered factory when the provider materializes a
/// service.
#[cfg_attr(test, automock)]
pub trait ServiceInstanceProvider {
    /// Tries to return an instance of the service registered for the given
    /// type, creating it if needed.
    fn instance(
        &mut self,
        type_id: TypeId,
    ) -> Result<ServiceInstanceAnyPtr, ServiceResolutionError>;
}

/// Helper trait for [ServiceInstanceProvider] providing strongly-typed
/// access.
pub trait TypedServiceInstanceProvider {
    /// Typesafe version of [ServiceInstanceProvider::instance].
    fn instance_typed<T: Send + Sync + 'static>(
        &mut self,
    ) -> Result<ServiceInstancePtr<T>, ServiceResolutionError>;

    /// Tries to get an instance like
    /// [TypedServiceInstanceProvider::instance_typed] does, but returns
    /// `None` when no service is registered for the type.
    fn instance_option<T: Send + Sync + 'static>(
        &mut self,
    ) -> Result<Option<ServiceInstancePtr<T>>, ServiceResolutionError>;
}

impl<P: ServiceInstanceProvider + ?Sized> TypedServiceInstanceProvider for P {
    fn instance_typed<T: Send + Sync + 'static>(
        &mut self,
    ) -> Result<ServiceInstancePtr<T>, ServiceResolutionError> {
        self.instance(TypeId::of::<T>()).and_then(|instance| {
            instance
                .downcast::<T>()
                .map_err(|_| ServiceResolutionError::IncompatibleInstance(TypeId::of::<T>()))
        })
    }

    fn instance_option<T: Send + Sync + 'static>(
        &mut self,
    ) -> Result<Option<ServiceInstancePtr<T>>, ServiceResolutionError> {
        match self.instance_typed::<T>() {
            Ok(instance) => Ok(Some(instance)),
            Err(ServiceResolutionError::NoRegisteredService(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
}
