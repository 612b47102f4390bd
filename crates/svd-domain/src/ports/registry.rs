//! Registry Ports
//!
//! The delegate binders never own components. They describe producers and
//! hand them to a registry through these traits.
//!
//! ```text
//! ┌──────────────────────┐   attach()    ┌──────────────────────┐
//! │   Container build    │ ────────────→ │   RegistrationHook   │
//! │ (per registration)   │               │  (scans markings)    │
//! └──────────────────────┘               └──────────────────────┘
//!            ↑                                      │
//!            │ register_producer()                  │
//!            └──────────────────────────────────────┘
//!
//! resolve::<D>() → Producer(&dyn Resolver) → resolve_any(dep) ...
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::{ComponentRegistration, Lifetime, TypeMeta};

/// A type-erased resolved value
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// Function producing the value of a service from the registry
pub type Producer = Arc<dyn Fn(&dyn Resolver) -> Result<AnyInstance> + Send + Sync>;

/// Resolution side of the registry
pub trait Resolver {
    /// Resolve a service by type, honoring its lifetime
    fn resolve_any(&self, service: TypeMeta) -> Result<AnyInstance>;

    /// Whether a resolvable registration exists for `service`
    fn is_registered(&self, service: TypeMeta) -> bool;
}

/// Typed resolution helpers available on every [`Resolver`]
pub trait ResolverExt {
    /// Resolve `T` and downcast it
    fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>>;
}

impl<R: Resolver + ?Sized> ResolverExt for R {
    fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        let instance = self.resolve_any(TypeMeta::of::<T>())?;
        downcast_instance::<T>(instance)
    }
}

/// Downcast a resolved value to `T`
pub fn downcast_instance<T: Any + Send + Sync>(instance: AnyInstance) -> Result<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| Error::type_mismatch(TypeMeta::of::<T>()))
}

/// A producer plus the metadata the registry needs to store it
#[derive(Clone)]
pub struct ProducerRegistration {
    service: TypeMeta,
    lifetime: Lifetime,
    producer: Producer,
    origin: Option<String>,
}

impl ProducerRegistration {
    /// Register `producer` as the source of `service`
    pub fn new(service: TypeMeta, lifetime: Lifetime, producer: Producer) -> Self {
        Self {
            service,
            lifetime,
            producer,
            origin: None,
        }
    }

    /// Record where the registration comes from, for diagnostics
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Service type produced
    pub fn service(&self) -> TypeMeta {
        self.service
    }

    /// Lifetime policy of the produced values
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// The producer function
    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    /// Diagnostic origin, if any
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl fmt::Debug for ProducerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerRegistration")
            .field("service", &self.service)
            .field("lifetime", &self.lifetime)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Registration side of the registry, available while it is being built
pub trait ComponentRegistry {
    /// Add a producer for a service type
    fn register_producer(&mut self, registration: ProducerRegistration) -> Result<()>;

    /// Whether any producer is registered for `service`
    fn contains(&self, service: TypeMeta) -> bool;
}

/// Build-pipeline stage invoked once per component registration
pub trait RegistrationHook: Send {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Inspect a registration and add derived producers
    fn attach(
        &mut self,
        registration: &ComponentRegistration,
        registry: &mut dyn ComponentRegistry,
    ) -> Result<()>;
}
