//! Frozen view of a [ServiceCollection](crate::service_registry::ServiceCollection)
//! used during the resolution phase.

use crate::scope::{InstanceCache, ServiceScope};
use crate::service_registry::{RegistrationPolicy, ServiceDescriptor};
use std::any::TypeId;
use std::sync::{Arc, Mutex};

/// Shared state of a built provider: the frozen descriptor list and the
/// provider-wide singleton store.
pub(crate) struct ProviderCore {
    descriptors: Box<[ServiceDescriptor]>,
    policy: RegistrationPolicy,
    pub(crate) singletons: Mutex<InstanceCache>,
}

impl ProviderCore {
    pub(crate) fn descriptor_for(&self, type_id: TypeId) -> Option<&ServiceDescriptor> {
        let mut matching = self
            .descriptors
            .iter()
            .filter(|descriptor| descriptor.service_type == type_id);

        match self.policy {
            RegistrationPolicy::LastWins => matching.last(),
            RegistrationPolicy::FirstWins => matching.next(),
        }
    }
}

/// Resolves registered services on demand. Created by
/// [ServiceCollection::build](crate::service_registry::ServiceCollection::build);
/// the underlying registry is read-only from this point on.
///
/// Resolution happens through [scopes](ServiceScope): singletons are created
/// once and shared between all scopes, scoped services once per scope.
/// Cloning the provider is cheap and yields a handle to the same underlying
/// registry and singleton store.
#[derive(Clone)]
pub struct ServiceProvider {
    core: Arc<ProviderCore>,
}

impl ServiceProvider {
    pub(crate) fn new(descriptors: Vec<ServiceDescriptor>, policy: RegistrationPolicy) -> Self {
        Self {
            core: Arc::new(ProviderCore {
                descriptors: descriptors.into(),
                policy,
                singletons: Default::default(),
            }),
        }
    }

    /// Creates a new resolution scope backed by this provider.
    pub fn create_scope(&self) -> ServiceScope {
        ServiceScope::new(self.core.clone())
    }
}
