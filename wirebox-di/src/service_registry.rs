//! Functionality related to registering service descriptors. A
//! [ServiceProvider](crate::provider::ServiceProvider) creates instances
//! based on those descriptors, which are appended in registration order
//! during the setup phase.

use crate::error::ServiceResolutionError;
use crate::instance_provider::{
    ServiceInstanceAnyPtr, ServiceInstancePtr, ServiceInstanceProvider,
};
use crate::provider::ServiceProvider;
use derivative::Derivative;
use itertools::Itertools;
use std::any::{type_name, TypeId};
use std::sync::Arc;
use tracing::debug;

/// Policy governing how many instances of a service exist per resolution
/// boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ServiceLifetime {
    /// One instance per provider, shared between all scopes.
    Singleton,
    /// One instance per [ServiceScope](crate::scope::ServiceScope).
    Scoped,
}

/// Policy applied when multiple descriptors exist for the same service type.
/// Registration itself always appends - the policy decides which descriptor
/// a lookup returns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RegistrationPolicy {
    /// The most recently registered descriptor wins.
    #[default]
    LastWins,
    /// The earliest registered descriptor wins.
    FirstWins,
}

/// Constructor function for type-erased service instances.
pub type ServiceConstructor = Arc<
    dyn Fn(&mut dyn ServiceInstanceProvider) -> Result<ServiceInstanceAnyPtr, ServiceResolutionError>
        + Send
        + Sync,
>;

/// Descriptor binding a service type to a lifetime and a construction
/// strategy.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ServiceDescriptor {
    /// Type under which the service is registered and later requested.
    pub service_type: TypeId,

    /// Human-readable name of the service type, for diagnostics.
    pub service_name: &'static str,

    /// Lifetime of instances created from this descriptor.
    pub lifetime: ServiceLifetime,

    /// Constructor for type-erased instances.
    #[derivative(Debug = "ignore")]
    pub constructor: ServiceConstructor,
}

impl ServiceDescriptor {
    /// Creates a singleton descriptor from a pre-built value. The value is
    /// erased once and every resolution returns the same instance.
    pub fn from_value<T: Send + Sync + 'static>(value: T) -> Self {
        let instance = ServiceInstancePtr::new(value) as ServiceInstanceAnyPtr;
        Self {
            service_type: TypeId::of::<T>(),
            service_name: type_name::<T>(),
            lifetime: ServiceLifetime::Singleton,
            constructor: Arc::new(move |_| Ok(instance.clone())),
        }
    }

    /// Creates a descriptor whose instances are built by `factory`, invoked
    /// with the active resolver.
    pub fn from_factory<T, F>(lifetime: ServiceLifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut dyn ServiceInstanceProvider) -> Result<T, ServiceResolutionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            service_type: TypeId::of::<T>(),
            service_name: type_name::<T>(),
            lifetime,
            constructor: Arc::new(move |provider| {
                factory(provider)
                    .map(|service| ServiceInstancePtr::new(service) as ServiceInstanceAnyPtr)
            }),
        }
    }
}

/// Ordered, append-only registry of [ServiceDescriptor]s. Descriptors are
/// appended during the single-threaded setup phase; [build](Self::build)
/// freezes the collection into a [ServiceProvider] for resolution.
#[derive(Default, Debug)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
    policy: RegistrationPolicy,
}

impl ServiceCollection {
    /// Creates an empty collection with the default
    /// [RegistrationPolicy::LastWins] policy.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an empty collection with the given duplicate-registration
    /// policy.
    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self {
            descriptors: Default::default(),
            policy,
        }
    }

    /// Returns the duplicate-registration policy of this collection.
    #[inline]
    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Appends a descriptor. Duplicate service types are allowed - the
    /// collection policy decides which descriptor resolution uses.
    pub fn register(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        debug!(
            "Registering {:?} service: {}",
            descriptor.lifetime, descriptor.service_name
        );

        self.descriptors.push(descriptor);
        self
    }

    /// Registers a pre-built value as a singleton.
    pub fn add_singleton_value<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        self.register(ServiceDescriptor::from_value(value))
    }

    /// Registers a singleton built by `factory` on first resolution.
    pub fn add_singleton_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut dyn ServiceInstanceProvider) -> Result<T, ServiceResolutionError>
            + Send
            + Sync
            + 'static,
    {
        self.register(ServiceDescriptor::from_factory(
            ServiceLifetime::Singleton,
            factory,
        ))
    }

    /// Registers a service built by `factory` once per scope.
    pub fn add_scoped_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut dyn ServiceInstanceProvider) -> Result<T, ServiceResolutionError>
            + Send
            + Sync
            + 'static,
    {
        self.register(ServiceDescriptor::from_factory(
            ServiceLifetime::Scoped,
            factory,
        ))
    }

    /// Checks if any descriptor is registered for the given type.
    pub fn is_registered<T: 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.descriptors
            .iter()
            .any(|descriptor| descriptor.service_type == type_id)
    }

    /// Returns the descriptor resolution would use for the given type,
    /// honoring the collection policy.
    pub fn descriptor_for(&self, type_id: TypeId) -> Option<&ServiceDescriptor> {
        let mut matching = self
            .descriptors
            .iter()
            .filter(|descriptor| descriptor.service_type == type_id);

        match self.policy {
            RegistrationPolicy::LastWins => matching.last(),
            RegistrationPolicy::FirstWins => matching.next(),
        }
    }

    /// Returns all descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }

    /// Returns the distinct service types registered in this collection, in
    /// first-registration order.
    pub fn service_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.service_type)
            .unique()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Freezes the collection into a [ServiceProvider]. No descriptors can
    /// be added afterwards.
    pub fn build(self) -> ServiceProvider {
        debug!(
            "Building service provider with {} descriptors for {} service types.",
            self.descriptors.len(),
            self.service_types().count()
        );

        ServiceProvider::new(self.descriptors, self.policy)
    }
}
