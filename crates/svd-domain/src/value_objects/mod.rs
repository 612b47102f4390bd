//! Value Objects
//!
//! Immutable descriptions of types, call signatures and bindings.

pub mod binding;
pub mod registration;
pub mod signature;
pub mod type_meta;

pub use binding::{BindingKind, DelegateBindingDescriptor, Lifetime};
pub use registration::{Activation, ComponentRegistration};
pub use signature::{DelegateSignature, ParameterBinding, ParameterList};
pub use type_meta::{TypeMeta, short_type_name};
