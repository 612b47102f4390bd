//! Delegate Marking Registry
//!
//! Markings are collected at link time with `linkme` distributed slices.
//! The marking macros (`delegate!`, `delegate_factory!`, `export_delegate!`)
//! submit one entry each; nothing is scanned at runtime beyond iterating
//! these slices.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Marking Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Code marks:      export_delegate!(Greeter, greet => Greet)  │
//! │                              ↓                                  │
//! │  2. Macro expands:   #[distributed_slice(SERVICE_DELEGATES)]    │
//! │                      static ENTRY: ServiceDelegateEntry = ..    │
//! │                              ↓                                  │
//! │  3. Catalog reads:   BindingCatalog::discover()                 │
//! │                              ↓                                  │
//! │  4. Hook binds:      Greeter registered → producer for Greet    │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use svd_domain::{
    BindingKind, DelegateBindingDescriptor, DelegateSignature, Lifetime, Result, TypeMeta,
};

use crate::export::ExportedMethod;
use crate::factory::{BoundProducer, FactoryMethod};

/// Binds an exported method to its declared delegate type
pub type BindFn = fn(&ExportedMethod, Lifetime) -> Result<BoundProducer>;

/// Registry entry for a delegate type
pub struct DelegateTypeEntry {
    /// The delegate type
    pub delegate: fn() -> TypeMeta,
    /// Its call signature
    pub signature: fn() -> DelegateSignature,
}

/// Registry entry for a factory composition method
pub struct DelegateFactoryEntry {
    /// Lifetime override for the produced delegate
    pub lifetime: Option<Lifetime>,
    /// Builds the type-erased factory
    pub factory: fn() -> FactoryMethod,
}

/// Registry entry for an exported instance method
pub struct ServiceDelegateEntry {
    /// Component type declaring the method
    pub owner: fn() -> TypeMeta,
    /// Method name
    pub method: &'static str,
    /// Declared delegate type
    pub delegate: fn() -> TypeMeta,
    /// Lifetime override for the produced delegate
    pub lifetime: Option<Lifetime>,
    /// Builds the type-erased method
    pub export: fn() -> ExportedMethod,
    /// Checks the method against the delegate and builds its producer
    pub bind: BindFn,
}

#[linkme::distributed_slice]
pub static DELEGATE_TYPES: [DelegateTypeEntry] = [..];

#[linkme::distributed_slice]
pub static DELEGATE_FACTORIES: [DelegateFactoryEntry] = [..];

#[linkme::distributed_slice]
pub static SERVICE_DELEGATES: [ServiceDelegateEntry] = [..];

/// List every delegate type declared in the binary
pub fn list_delegate_types() -> Vec<(TypeMeta, DelegateSignature)> {
    DELEGATE_TYPES
        .iter()
        .map(|entry| ((entry.delegate)(), (entry.signature)()))
        .collect()
}

/// List every marked method in the binary
///
/// Useful for diagnostics: the descriptors say which delegate each marking
/// would produce once its owner is registered.
pub fn list_delegate_bindings() -> DelegateBindings {
    let factories = DELEGATE_FACTORIES
        .iter()
        .map(|entry| (entry.factory)().descriptor());

    let exports = SERVICE_DELEGATES.iter().map(|entry| {
        DelegateBindingDescriptor::new(
            (entry.owner)(),
            entry.method,
            (entry.delegate)(),
            BindingKind::ServiceExport,
        )
    });

    DelegateBindings(factories.chain(exports).collect())
}

/// Marked methods grouped for display
#[derive(Debug, Clone, Default)]
pub struct DelegateBindings(pub Vec<DelegateBindingDescriptor>);

impl DelegateBindings {
    /// Descriptors of the given kind
    pub fn of_kind(&self, kind: BindingKind) -> impl Iterator<Item = &DelegateBindingDescriptor> {
        self.0.iter().filter(move |d| d.kind() == kind)
    }
}

impl fmt::Display for DelegateBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Delegate Factories:")?;
        for descriptor in self.of_kind(BindingKind::FactoryComposition) {
            writeln!(f, "  - {descriptor}")?;
        }
        writeln!(f)?;

        writeln!(f, "Service Delegates:")?;
        for descriptor in self.of_kind(BindingKind::ServiceExport) {
            writeln!(f, "  - {descriptor}")?;
        }

        Ok(())
    }
}
