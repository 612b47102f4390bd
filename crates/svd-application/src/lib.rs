//! Application Layer - Service Delegates
//!
//! Turns marked methods into delegate producers and wires them into a
//! registry while it is being built.
//!
//! ## Architecture
//!
//! ```text
//! delegate_factory! / export_delegate!      (link time)
//!              ↓
//! DELEGATE_FACTORIES / SERVICE_DELEGATES    (linkme slices)
//!              ↓
//! BindingCatalog::discover()
//!              ↓
//! DelegateRegistrationHook::attach()        (container build, per component)
//!      ├── FactoryBinder::bind()          → Producer for the returned delegate
//!      └── ServiceDelegateBinder::bind()  → Producer bound to the component
//!              ↓
//! ComponentRegistry::register_producer()
//! ```
//!
//! Both binders rely on [`signature::SignatureResolver`] to describe which
//! services have to be resolved before a method can be called.

pub mod catalog;
pub mod export;
pub mod factory;
pub mod hook;
pub mod registry;
pub mod signature;

mod macros;

pub use catalog::{BindingCatalog, ExportMarking, FactoryMarking};
pub use export::{BoundMethod, ExportedMethod, MethodFn, ServiceDelegateBinder};
pub use factory::{BoundProducer, FactoryBinder, FactoryFn, FactoryMethod};
pub use hook::DelegateRegistrationHook;
pub use signature::{Injectable, ResolutionPlan, ResolveRequest, SignatureResolver};

#[doc(hidden)]
pub mod __private {
    pub use linkme;
    pub use svd_domain::{Delegate, DelegateSignature, Lifetime, TypeMeta};
    pub use svd_domain::delegate::DelegateFn;
}
