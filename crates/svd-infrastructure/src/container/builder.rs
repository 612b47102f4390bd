//! Container builder
//!
//! Collects registrations, then runs every registration hook once per
//! component registration, in registration order, before freezing the
//! table. Hooks see all components, including those registered before the
//! hook was installed.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use svd_application::{BindingCatalog, DelegateRegistrationHook};
use svd_domain::error::Result;
use svd_domain::ports::{AnyInstance, Producer, ProducerRegistration, RegistrationHook, Resolver};
use svd_domain::{Activation, ComponentRegistration, Lifetime, TypeMeta};
use tracing::{debug, info};

use super::scope::Container;
use super::table::RegistrationTable;
use crate::config::{ContainerConfig, DelegateConfig};

struct PendingComponent {
    service: TypeMeta,
    lifetime: Lifetime,
    activation: Activation,
    producer: Option<Producer>,
}

impl PendingComponent {
    fn registration(&self) -> ComponentRegistration {
        ComponentRegistration::new(self.service, self.lifetime, self.activation)
    }
}

enum Pending {
    Component(PendingComponent),
    Producer(ProducerRegistration),
}

/// Lifetime configuration for a component just registered
pub struct ComponentHandle<'a> {
    builder: &'a mut ContainerBuilder,
    index: usize,
}

impl ComponentHandle<'_> {
    /// Set the lifetime policy
    pub fn lifetime(self, lifetime: Lifetime) -> Self {
        if let Some(Pending::Component(component)) = self.builder.pending.get_mut(self.index) {
            component.lifetime = lifetime;
        }
        self
    }

    /// One instance for the whole container
    pub fn singleton(self) -> Self {
        self.lifetime(Lifetime::Singleton)
    }

    /// A fresh instance per resolution
    pub fn transient(self) -> Self {
        self.lifetime(Lifetime::Transient)
    }

    /// One instance per scope
    pub fn scoped(self) -> Self {
        self.lifetime(Lifetime::Scoped)
    }
}

/// Registration phase of a [`Container`]
pub struct ContainerBuilder {
    pending: Vec<Pending>,
    hooks: Vec<Box<dyn RegistrationHook>>,
    delegates: Option<DelegateRegistrationHook>,
    config: DelegateConfig,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    /// Builder with the default delegate settings
    pub fn new() -> Self {
        Self::with_config(DelegateConfig::default())
    }

    /// Builder with explicit delegate settings
    pub fn with_config(config: DelegateConfig) -> Self {
        Self {
            pending: Vec::new(),
            hooks: Vec::new(),
            delegates: None,
            config,
        }
    }

    /// Builder configured from a loaded [`ContainerConfig`]
    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::with_config(config.delegates.clone())
    }

    /// Register `T` built by `ctor`; transient unless changed on the handle
    pub fn register_type<T, F>(&mut self, ctor: F) -> ComponentHandle<'_>
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> Result<T> + Send + Sync + 'static,
    {
        let producer: Producer =
            Arc::new(move |resolver: &dyn Resolver| Ok(Arc::new(ctor(resolver)?) as AnyInstance));
        self.push_component(PendingComponent {
            service: TypeMeta::of::<T>(),
            lifetime: Lifetime::Transient,
            activation: Activation::Constructor,
            producer: Some(producer),
        })
    }

    /// Register `T` built with `T::default()`
    pub fn register_default<T>(&mut self) -> ComponentHandle<'_>
    where
        T: Default + Send + Sync + 'static,
    {
        self.register_type(|_| Ok(T::default()))
    }

    /// Register an externally created instance, shared by every resolution
    pub fn register_instance<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        let instance: AnyInstance = Arc::new(value);
        let producer: Producer = Arc::new(move |_: &dyn Resolver| Ok(Arc::clone(&instance)));
        self.push_component(PendingComponent {
            service: TypeMeta::of::<T>(),
            lifetime: Lifetime::Singleton,
            activation: Activation::Instance,
            producer: Some(producer),
        });
        self
    }

    /// Register a raw producer; hooks do not scan it
    pub fn register_producer(&mut self, registration: ProducerRegistration) -> &mut Self {
        self.pending.push(Pending::Producer(registration));
        self
    }

    /// Scan `T` for delegate factories without making `T` resolvable
    ///
    /// Installs the delegate registration hook if it is not installed yet.
    pub fn register_delegate_factories<T: Any>(&mut self) -> &mut Self {
        self.push_component(PendingComponent {
            service: TypeMeta::of::<T>(),
            lifetime: Lifetime::Transient,
            activation: Activation::StaticOnly,
            producer: None,
        });
        if self.delegates.is_none() {
            self.register_service_delegates();
        }
        self
    }

    /// Install the delegate registration hook over the configured markings
    ///
    /// Reads the link-time markings unless `discover_markings` is off.
    /// Installing twice keeps the first hook.
    pub fn register_service_delegates(&mut self) -> &mut Self {
        if self.delegates.is_some() {
            debug!("Delegate registration hook already installed");
            return self;
        }
        let catalog = if self.config.discover_markings {
            BindingCatalog::discover()
        } else {
            BindingCatalog::new()
        };
        self.register_service_delegates_with(catalog)
    }

    /// Install the delegate registration hook over an explicit catalog
    ///
    /// Replaces a hook installed earlier.
    pub fn register_service_delegates_with(&mut self, catalog: BindingCatalog) -> &mut Self {
        debug!(markings = catalog.len(), "Installing delegate registration hook");
        self.delegates = Some(DelegateRegistrationHook::new(
            catalog,
            self.config.default_lifetime,
        ));
        self
    }

    /// Install a custom registration hook
    pub fn register_hook<H: RegistrationHook + 'static>(&mut self, hook: H) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Run the hooks and freeze the registry
    ///
    /// Fails on the first hook error; no container is produced in that case.
    pub fn build(self) -> Result<Container> {
        let mut hooks: Vec<Box<dyn RegistrationHook>> = self
            .delegates
            .map(|hook| Box::new(hook) as Box<dyn RegistrationHook>)
            .into_iter()
            .chain(self.hooks)
            .collect();

        let mut table = RegistrationTable::new();
        let mut components = 0_usize;

        for pending in self.pending {
            match pending {
                Pending::Producer(registration) => table.insert(registration),
                Pending::Component(component) => {
                    components += 1;
                    let registration = component.registration();
                    match component.producer {
                        Some(producer) => table.insert(ProducerRegistration::new(
                            component.service,
                            component.lifetime,
                            producer,
                        )),
                        None => table.insert_static(component.service),
                    }
                    for hook in &mut hooks {
                        debug!(hook = hook.name(), component = %registration, "Attaching hook");
                        hook.attach(&registration, &mut table)?;
                    }
                }
            }
        }

        info!(
            components,
            services = table.len(),
            hooks = hooks.len(),
            "Container built"
        );
        Ok(Container::new(table))
    }

    fn push_component(&mut self, component: PendingComponent) -> ComponentHandle<'_> {
        let index = self.pending.len();
        self.pending.push(Pending::Component(component));
        ComponentHandle {
            builder: self,
            index,
        }
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("registrations", &self.pending.len())
            .field("hooks", &self.hooks.len())
            .field("delegates", &self.delegates.is_some())
            .field("config", &self.config)
            .finish()
    }
}
