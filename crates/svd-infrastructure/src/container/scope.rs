//! Container and resolution scopes

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use svd_domain::error::{Error, Result};
use svd_domain::ports::{AnyInstance, ProducerRegistration, Resolver, downcast_instance};
use svd_domain::{Lifetime, TypeMeta};
use tracing::trace;

use super::cache::InstanceCache;
use super::table::{RegistrationTable, ServiceEntry};
use super::waits::WaitGraph;

struct Root {
    table: RegistrationTable,
    singletons: InstanceCache,
    waits: Arc<WaitGraph>,
}

/// A built, structurally read-only registry
///
/// Cloning is cheap and yields a handle to the same scope. Safe to resolve
/// from several threads at once.
#[derive(Clone)]
pub struct Container {
    root: Arc<Root>,
    scoped: Arc<InstanceCache>,
}

impl Container {
    pub(crate) fn new(table: RegistrationTable) -> Self {
        let waits = Arc::new(WaitGraph::default());
        Self {
            root: Arc::new(Root {
                table,
                singletons: InstanceCache::with_wait_graph(Arc::clone(&waits)),
                waits: Arc::clone(&waits),
            }),
            scoped: Arc::new(InstanceCache::with_wait_graph(waits)),
        }
    }

    /// Resolve `T`, honoring its registered lifetime
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let instance = self.resolve_any(TypeMeta::of::<T>())?;
        downcast_instance::<T>(instance)
    }

    /// Whether `T` can be resolved
    pub fn is_registered<T: Any>(&self) -> bool {
        self.root.table.is_resolvable(TypeMeta::of::<T>())
    }

    /// New scope sharing this container's registrations and singletons
    pub fn begin_scope(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            scoped: Arc::new(InstanceCache::with_wait_graph(Arc::clone(&self.root.waits))),
        }
    }

    /// Number of registered services, static-only types included
    pub fn len(&self) -> usize {
        self.root.table.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.root.table.is_empty()
    }

    /// Registered service types
    pub fn services(&self) -> impl Iterator<Item = TypeMeta> + '_ {
        self.root.table.services()
    }

    fn activate(
        &self,
        service: TypeMeta,
        registration: &ProducerRegistration,
        context: &ResolutionContext<'_>,
    ) -> Result<AnyInstance> {
        let produce = || {
            trace!(service = %service, lifetime = %registration.lifetime(), "Producing instance");
            (registration.producer())(context as &dyn Resolver)
        };

        match registration.lifetime() {
            Lifetime::Transient => produce(),
            Lifetime::Singleton => self.root.singletons.get_or_try_init(service, produce),
            Lifetime::Scoped => self.scoped.get_or_try_init(service, produce),
        }
    }
}

impl Resolver for Container {
    fn resolve_any(&self, service: TypeMeta) -> Result<AnyInstance> {
        ResolutionContext::new(self).resolve_any(service)
    }

    fn is_registered(&self, service: TypeMeta) -> bool {
        self.root.table.is_resolvable(service)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.root.table.len())
            .field("singletons", &self.root.singletons.len())
            .field("scoped", &self.scoped.len())
            .finish()
    }
}

/// One top-level resolution and the services it is currently producing
struct ResolutionContext<'a> {
    container: &'a Container,
    path: RefCell<Vec<TypeMeta>>,
}

impl<'a> ResolutionContext<'a> {
    fn new(container: &'a Container) -> Self {
        Self {
            container,
            path: RefCell::new(Vec::new()),
        }
    }
}

impl Resolver for ResolutionContext<'_> {
    fn resolve_any(&self, service: TypeMeta) -> Result<AnyInstance> {
        if self.path.borrow().contains(&service) {
            return Err(Error::circular(service, &self.path.borrow()));
        }

        let registration = match self.container.root.table.get(service) {
            Some(ServiceEntry::Producer(registration)) => registration,
            Some(ServiceEntry::StaticOnly) => return Err(Error::not_activatable(service)),
            None => return Err(Error::not_registered(service)),
        };

        self.path.borrow_mut().push(service);
        let result = self.container.activate(service, registration, self);
        self.path.borrow_mut().pop();
        result
    }

    fn is_registered(&self, service: TypeMeta) -> bool {
        self.container.root.table.is_resolvable(service)
    }
}
