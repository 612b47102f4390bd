//! Read-only view of a component registration

use std::fmt;

use super::binding::Lifetime;
use super::type_meta::TypeMeta;

/// How the registry obtains instances of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Constructed by a registered constructor
    Constructor,
    /// A pre-built instance handed to the registry
    Instance,
    /// Declared only so its static methods are scanned; never resolvable
    StaticOnly,
}

/// An entry the registry manages, as seen by registration hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistration {
    limit_type: TypeMeta,
    lifetime: Lifetime,
    activation: Activation,
}

impl ComponentRegistration {
    /// Describe a registration of `limit_type`
    pub fn new(limit_type: TypeMeta, lifetime: Lifetime, activation: Activation) -> Self {
        Self {
            limit_type,
            lifetime,
            activation,
        }
    }

    /// Concrete type backing the registration
    pub fn limit_type(&self) -> TypeMeta {
        self.limit_type
    }

    /// Declared lifetime policy
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Activation strategy
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Whether instances of the component can be resolved
    pub fn is_activatable(&self) -> bool {
        self.activation != Activation::StaticOnly
    }
}

impl fmt::Display for ComponentRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.limit_type, self.lifetime)
    }
}
