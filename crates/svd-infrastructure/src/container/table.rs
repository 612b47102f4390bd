//! Registration table
//!
//! Maps each service type to how it is produced. Filled while the builder
//! runs its registration hooks, read-only once the container is built.

use std::collections::HashMap;

use svd_domain::error::Result;
use svd_domain::ports::{ComponentRegistry, ProducerRegistration};
use svd_domain::TypeMeta;
use tracing::{debug, warn};

/// How a registered service is obtained
#[derive(Debug, Clone)]
pub enum ServiceEntry {
    /// Produced on resolution according to its lifetime
    Producer(ProducerRegistration),
    /// Known to the registry but not resolvable
    StaticOnly,
}

/// Service type → entry
#[derive(Debug, Default)]
pub struct RegistrationTable {
    entries: HashMap<TypeMeta, ServiceEntry>,
}

impl RegistrationTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a producer; a later registration replaces an earlier one
    pub fn insert(&mut self, registration: ProducerRegistration) {
        let service = registration.service();
        let origin = registration.origin().map(str::to_owned);
        if let Some(ServiceEntry::Producer(previous)) = self
            .entries
            .insert(service, ServiceEntry::Producer(registration))
        {
            warn!(
                service = %service,
                previous = previous.origin().unwrap_or("explicit registration"),
                current = origin.as_deref().unwrap_or("explicit registration"),
                "Registration overrides an earlier one"
            );
        }
    }

    /// Declare `service` as static-only unless it is already resolvable
    pub fn insert_static(&mut self, service: TypeMeta) {
        if self.entries.contains_key(&service) {
            debug!(service = %service, "Keeping existing registration of static-only type");
            return;
        }
        self.entries.insert(service, ServiceEntry::StaticOnly);
    }

    /// Entry registered for `service`
    pub fn get(&self, service: TypeMeta) -> Option<&ServiceEntry> {
        self.entries.get(&service)
    }

    /// Whether `service` can be resolved
    pub fn is_resolvable(&self, service: TypeMeta) -> bool {
        matches!(self.get(service), Some(ServiceEntry::Producer(_)))
    }

    /// Number of registered services, static-only ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered service types
    pub fn services(&self) -> impl Iterator<Item = TypeMeta> + '_ {
        self.entries.keys().copied()
    }
}

impl ComponentRegistry for RegistrationTable {
    fn register_producer(&mut self, registration: ProducerRegistration) -> Result<()> {
        debug!(
            service = %registration.service(),
            lifetime = %registration.lifetime(),
            "Registering producer"
        );
        self.insert(registration);
        Ok(())
    }

    fn contains(&self, service: TypeMeta) -> bool {
        self.entries.contains_key(&service)
    }
}
