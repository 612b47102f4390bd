//! Delegate Registration Hook
//!
//! Registration-pipeline stage that scans every component registered with
//! the container and registers producers for the delegates its markings
//! declare. Scanning happens during container build, so every delegate
//! producer exists before the first resolution.
//!
//! Per component type the hook moves Unscanned → FactoriesScanned →
//! Scanned. A static-only registration stops at FactoriesScanned; a later
//! activatable registration of the same type binds the exports it skipped.
//! Registering a fully scanned type again is a no-op.

use std::collections::HashMap;

use svd_domain::ports::{ComponentRegistry, RegistrationHook};
use svd_domain::{ComponentRegistration, DelegateBindingDescriptor, Error, Lifetime, Result, TypeMeta};
use tracing::debug;

use crate::catalog::BindingCatalog;
use crate::factory::{BoundProducer, FactoryBinder};

/// How far a component type has been scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Factories bound, exports skipped for a static-only registration
    FactoriesScanned,
    /// Factories and exports bound
    Scanned,
}

/// Registers factory and export producers for scanned components
pub struct DelegateRegistrationHook {
    catalog: BindingCatalog,
    factory_binder: FactoryBinder,
    default_lifetime: Lifetime,
    scanned: HashMap<TypeMeta, ScanState>,
    claimed: HashMap<TypeMeta, DelegateBindingDescriptor>,
}

impl DelegateRegistrationHook {
    /// Hook over an explicit catalog
    pub fn new(catalog: BindingCatalog, default_lifetime: Lifetime) -> Self {
        let factory_binder = FactoryBinder::new(catalog.delegate_types());
        Self {
            catalog,
            factory_binder,
            default_lifetime,
            scanned: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    /// Hook over every marking linked into the binary
    pub fn discover(default_lifetime: Lifetime) -> Self {
        Self::new(BindingCatalog::discover(), default_lifetime)
    }

    /// Lifetime used when a marking does not set one
    pub fn default_lifetime(&self) -> Lifetime {
        self.default_lifetime
    }

    /// Whether `ty` has been scanned at least for factories
    pub fn is_scanned(&self, ty: TypeMeta) -> bool {
        self.scanned.contains_key(&ty)
    }

    /// Whether the exports of `ty` have been bound
    pub fn exports_scanned(&self, ty: TypeMeta) -> bool {
        self.scanned.get(&ty) == Some(&ScanState::Scanned)
    }

    /// Descriptors of every delegate registered so far
    pub fn bindings(&self) -> impl Iterator<Item = &DelegateBindingDescriptor> {
        self.claimed.values()
    }

    fn scan_factories(&self, owner: TypeMeta) -> Result<Vec<BoundProducer>> {
        self.catalog
            .factories_for(owner)
            .map(|marking| marking.bind(&self.factory_binder, self.default_lifetime))
            .collect()
    }

    fn scan_exports(&self, owner: TypeMeta) -> Result<Vec<BoundProducer>> {
        self.catalog
            .exports_for(owner)
            .map(|marking| marking.bind(self.default_lifetime))
            .collect()
    }

    fn claim(&mut self, bound: &[BoundProducer]) -> Result<()> {
        let mut batch: HashMap<TypeMeta, &DelegateBindingDescriptor> = HashMap::new();

        for producer in bound {
            let descriptor = producer.descriptor();
            let delegate = descriptor.delegate();
            let earlier = self
                .claimed
                .get(&delegate)
                .or_else(|| batch.get(&delegate).copied());
            if let Some(first) = earlier {
                return Err(Error::ambiguous_marking(first, descriptor));
            }
            batch.insert(delegate, descriptor);
        }

        for (delegate, descriptor) in batch {
            self.claimed.insert(delegate, descriptor.clone());
        }
        Ok(())
    }
}

impl RegistrationHook for DelegateRegistrationHook {
    fn name(&self) -> &str {
        "service-delegates"
    }

    fn attach(
        &mut self,
        registration: &ComponentRegistration,
        registry: &mut dyn ComponentRegistry,
    ) -> Result<()> {
        let owner = registration.limit_type();
        let previous = self.scanned.get(&owner).copied();

        let mut bound = match previous {
            None => self.scan_factories(owner)?,
            Some(ScanState::FactoriesScanned) if registration.is_activatable() => Vec::new(),
            Some(_) => {
                debug!(component = %owner, "Component already scanned");
                return Ok(());
            }
        };

        let next = if registration.is_activatable() {
            bound.extend(self.scan_exports(owner)?);
            ScanState::Scanned
        } else {
            if self.catalog.exports_for(owner).next().is_some() {
                debug!(
                    component = %owner,
                    "Deferring service delegate exports of a static-only registration"
                );
            }
            ScanState::FactoriesScanned
        };

        self.claim(&bound)?;
        self.scanned.insert(owner, next);

        if !bound.is_empty() {
            debug!(component = %owner, delegates = bound.len(), "Registering delegate producers");
        }
        for producer in bound {
            registry.register_producer(producer.into_registration())?;
        }
        Ok(())
    }
}
