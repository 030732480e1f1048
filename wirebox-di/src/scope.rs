//! Resolution scopes. A [ServiceScope] is the unit of work boundary for
//! [scoped](crate::service_registry::ServiceLifetime::Scoped) services:
//! each scope materializes its own instances, created at most once per
//! scope, while singletons are shared with every other scope of the same
//! provider.

use crate::error::ServiceResolutionError;
use crate::instance_provider::{ServiceInstanceAnyPtr, ServiceInstanceProvider};
use crate::provider::ProviderCore;
use crate::service_registry::{ServiceDescriptor, ServiceLifetime};
use fxhash::{FxHashMap, FxHashSet};
use std::any::TypeId;
use std::sync::{Arc, PoisonError};
use tracing::debug;

/// Storage for materialized instances, keyed by service type.
#[derive(Default)]
pub(crate) struct InstanceCache {
    instances: FxHashMap<TypeId, ServiceInstanceAnyPtr>,
}

impl InstanceCache {
    #[inline]
    pub(crate) fn instance(&self, type_id: TypeId) -> Option<ServiceInstanceAnyPtr> {
        self.instances.get(&type_id).cloned()
    }

    #[inline]
    pub(crate) fn store_instance(&mut self, type_id: TypeId, instance: ServiceInstanceAnyPtr) {
        self.instances.insert(type_id, instance);
    }
}

/// A resolution scope created by
/// [ServiceProvider::create_scope](crate::provider::ServiceProvider::create_scope).
/// Implements [ServiceInstanceProvider] and is handed to every registered
/// factory invoked while resolving through it.
pub struct ServiceScope {
    core: Arc<ProviderCore>,
    scoped_instances: InstanceCache,
    types_under_construction: FxHashSet<TypeId>,
}

impl ServiceScope {
    pub(crate) fn new(core: Arc<ProviderCore>) -> Self {
        Self {
            core,
            scoped_instances: Default::default(),
            types_under_construction: Default::default(),
        }
    }

    fn construct(
        &mut self,
        descriptor: &ServiceDescriptor,
    ) -> Result<ServiceInstanceAnyPtr, ServiceResolutionError> {
        if !self.types_under_construction.insert(descriptor.service_type) {
            return Err(ServiceResolutionError::DependencyCycle(
                descriptor.service_type,
            ));
        }

        debug!("Constructing service: {}", descriptor.service_name);

        let instance = (descriptor.constructor)(self);
        self.types_under_construction.remove(&descriptor.service_type);

        instance
    }
}

impl ServiceInstanceProvider for ServiceScope {
    fn instance(
        &mut self,
        type_id: TypeId,
    ) -> Result<ServiceInstanceAnyPtr, ServiceResolutionError> {
        let descriptor = self
            .core
            .descriptor_for(type_id)
            .ok_or(ServiceResolutionError::NoRegisteredService(type_id))?
            .clone();

        match descriptor.lifetime {
            ServiceLifetime::Singleton => {
                {
                    let singletons = self
                        .core
                        .singletons
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    if let Some(instance) = singletons.instance(type_id) {
                        return Ok(instance);
                    }
                }

                // the lock is released while the constructor runs, since it
                // may resolve further singletons through this scope
                let instance = self.construct(&descriptor)?;

                let mut singletons = self
                    .core
                    .singletons
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(existing) = singletons.instance(type_id) {
                    // another scope stored an instance while ours was being
                    // constructed - keep the stored one
                    return Ok(existing);
                }

                singletons.store_instance(type_id, instance.clone());
                Ok(instance)
            }
            ServiceLifetime::Scoped => {
                if let Some(instance) = self.scoped_instances.instance(type_id) {
                    return Ok(instance);
                }

                let instance = self.construct(&descriptor)?;
                self.scoped_instances.store_instance(type_id, instance.clone());

                Ok(instance)
            }
        }
    }
}
