//! Binding Catalog
//!
//! Explicit table of delegate markings: which owner declares which factory or
//! export, and which types count as delegate types. A catalog is either
//! discovered from the link-time registry or assembled by hand.

use std::collections::HashSet;
use std::fmt;

use svd_domain::{Delegate, Lifetime, Result, TypeMeta};

use crate::export::{ExportedMethod, ServiceDelegateBinder};
use crate::factory::{BoundProducer, FactoryBinder, FactoryMethod};
use crate::registry::{BindFn, DELEGATE_FACTORIES, DELEGATE_TYPES, SERVICE_DELEGATES};

/// A factory composition method and its lifetime override
#[derive(Debug, Clone)]
pub struct FactoryMarking {
    method: FactoryMethod,
    lifetime: Option<Lifetime>,
}

impl FactoryMarking {
    /// The marked method
    pub fn method(&self) -> &FactoryMethod {
        &self.method
    }

    /// Lifetime override, if the marking sets one
    pub fn lifetime(&self) -> Option<Lifetime> {
        self.lifetime
    }

    /// Bind through `binder`, falling back to `default` lifetime
    pub fn bind(&self, binder: &FactoryBinder, default: Lifetime) -> Result<BoundProducer> {
        binder.bind(&self.method, self.lifetime.unwrap_or(default))
    }
}

/// An exported instance method, its delegate type and lifetime override
#[derive(Clone)]
pub struct ExportMarking {
    owner: TypeMeta,
    delegate: TypeMeta,
    method: ExportedMethod,
    lifetime: Option<Lifetime>,
    bind: BindFn,
}

impl ExportMarking {
    /// Component type the marking belongs to
    pub fn owner(&self) -> TypeMeta {
        self.owner
    }

    /// Declared delegate type
    pub fn delegate(&self) -> TypeMeta {
        self.delegate
    }

    /// The marked method
    pub fn method(&self) -> &ExportedMethod {
        &self.method
    }

    /// Lifetime override, if the marking sets one
    pub fn lifetime(&self) -> Option<Lifetime> {
        self.lifetime
    }

    /// Check the signature and build the producer
    pub fn bind(&self, default: Lifetime) -> Result<BoundProducer> {
        (self.bind)(&self.method, self.lifetime.unwrap_or(default))
    }
}

impl fmt::Debug for ExportMarking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportMarking")
            .field("owner", &self.owner)
            .field("delegate", &self.delegate)
            .field("method", &self.method.name())
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// Table of markings consulted by the registration hook
#[derive(Debug, Clone, Default)]
pub struct BindingCatalog {
    factories: Vec<FactoryMarking>,
    exports: Vec<ExportMarking>,
    delegate_types: HashSet<TypeMeta>,
}

impl BindingCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every marking linked into the binary
    pub fn discover() -> Self {
        let factories = DELEGATE_FACTORIES
            .iter()
            .map(|entry| FactoryMarking {
                method: (entry.factory)(),
                lifetime: entry.lifetime,
            })
            .collect();

        let exports = SERVICE_DELEGATES
            .iter()
            .map(|entry| ExportMarking {
                owner: (entry.owner)(),
                delegate: (entry.delegate)(),
                method: (entry.export)(),
                lifetime: entry.lifetime,
                bind: entry.bind,
            })
            .collect::<Vec<_>>();

        let delegate_types = DELEGATE_TYPES
            .iter()
            .map(|entry| (entry.delegate)())
            .chain(exports.iter().map(ExportMarking::delegate))
            .collect();

        Self {
            factories,
            exports,
            delegate_types,
        }
    }

    /// Declare `D` as a delegate type
    pub fn with_delegate_type<D: Delegate>(mut self) -> Self {
        self.delegate_types.insert(TypeMeta::of::<D>());
        self
    }

    /// Add a factory composition method
    pub fn with_factory(mut self, method: FactoryMethod, lifetime: Option<Lifetime>) -> Self {
        self.factories.push(FactoryMarking { method, lifetime });
        self
    }

    /// Add an export of a method of `T` as delegate `D`
    pub fn with_export<T, D>(mut self, method: ExportedMethod, lifetime: Option<Lifetime>) -> Self
    where
        T: Send + Sync + 'static,
        D: Delegate,
    {
        let delegate = TypeMeta::of::<D>();
        self.delegate_types.insert(delegate);
        self.exports.push(ExportMarking {
            owner: TypeMeta::of::<T>(),
            delegate,
            method,
            lifetime,
            bind: ServiceDelegateBinder::bind::<T, D>,
        });
        self
    }

    /// Append every marking of `other`
    pub fn merge(mut self, other: BindingCatalog) -> Self {
        self.factories.extend(other.factories);
        self.exports.extend(other.exports);
        self.delegate_types.extend(other.delegate_types);
        self
    }

    /// Factory markings declared by `owner`
    pub fn factories_for(&self, owner: TypeMeta) -> impl Iterator<Item = &FactoryMarking> {
        self.factories
            .iter()
            .filter(move |marking| marking.method.owner() == owner)
    }

    /// Export markings declared by `owner`
    pub fn exports_for(&self, owner: TypeMeta) -> impl Iterator<Item = &ExportMarking> {
        self.exports
            .iter()
            .filter(move |marking| marking.owner == owner)
    }

    /// Every known delegate type
    pub fn delegate_types(&self) -> impl Iterator<Item = TypeMeta> + '_ {
        self.delegate_types.iter().copied()
    }

    /// Total number of markings
    pub fn len(&self) -> usize {
        self.factories.len() + self.exports.len()
    }

    /// Whether the catalog holds no markings
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
