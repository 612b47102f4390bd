//! Binding descriptors and lifetime policies

use std::fmt;

use serde::{Deserialize, Serialize};

use super::type_meta::TypeMeta;

/// Registry rule governing whether a resolved value is cached and reused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// One shared value for the whole container
    Singleton,
    /// A fresh value per resolution
    #[default]
    Transient,
    /// One value per lifetime scope
    Scoped,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
            Self::Scoped => f.write_str("scoped"),
        }
    }
}

/// How a delegate value is synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// A static method composes the delegate from resolved parameters
    FactoryComposition,
    /// An instance method is bound to a resolved component
    ServiceExport,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FactoryComposition => f.write_str("factory composition"),
            Self::ServiceExport => f.write_str("service export"),
        }
    }
}

/// Where a delegate type comes from
///
/// Created once while a component type is scanned and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelegateBindingDescriptor {
    owner: TypeMeta,
    method: &'static str,
    delegate: TypeMeta,
    kind: BindingKind,
}

impl DelegateBindingDescriptor {
    /// Describe `owner::method` producing `delegate`
    pub fn new(
        owner: TypeMeta,
        method: &'static str,
        delegate: TypeMeta,
        kind: BindingKind,
    ) -> Self {
        Self {
            owner,
            method,
            delegate,
            kind,
        }
    }

    /// Type declaring the marked method
    pub fn owner(&self) -> TypeMeta {
        self.owner
    }

    /// Name of the marked method
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Delegate type the binding produces
    pub fn delegate(&self) -> TypeMeta {
        self.delegate
    }

    /// Factory composition or service export
    pub fn kind(&self) -> BindingKind {
        self.kind
    }
}

impl fmt::Display for DelegateBindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} => {} ({})",
            self.owner, self.method, self.delegate, self.kind
        )
    }
}
