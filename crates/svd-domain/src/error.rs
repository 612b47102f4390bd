//! Error handling types

use thiserror::Error;

use crate::value_objects::{DelegateBindingDescriptor, DelegateSignature, TypeMeta};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Why a service could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// Nothing is registered for the service
    #[error("no registration exists for this type")]
    NotRegistered,

    /// The service is only declared for static scanning
    #[error("the type is registered for static delegate factories only and cannot be activated")]
    NotActivatable,

    /// The service depends on itself through the listed path
    #[error("circular dependency: {path}")]
    Circular {
        /// Resolution path, outermost first
        path: String,
    },

    /// The registry produced a value of a different type
    #[error("the registry produced a value that is not a `{expected}`")]
    TypeMismatch {
        /// Type the caller asked for
        expected: String,
    },
}

/// Main error type for delegate synthesis
#[derive(Error, Debug)]
pub enum Error {
    /// A factory composition method cannot produce a delegate
    #[error("Invalid factory signature for {owner}::{method}: {message}")]
    InvalidFactorySignature {
        /// Type declaring the factory
        owner: String,
        /// Factory method name
        method: String,
        /// What is wrong with the signature
        message: String,
    },

    /// An exported method does not match its declared delegate type
    #[error(
        "Signature mismatch exporting {owner}::{method} as {delegate}: expected {expected}, found {actual}"
    )]
    SignatureMismatch {
        /// Component type declaring the method
        owner: String,
        /// Method name
        method: String,
        /// Declared delegate type
        delegate: String,
        /// Signature of the delegate type
        expected: String,
        /// Signature of the method
        actual: String,
    },

    /// A dependency or owning instance could not be resolved
    #[error("Cannot resolve `{service}`: {reason}")]
    DependencyResolution {
        /// The type that failed to resolve
        service: String,
        /// Failure cause
        reason: ResolutionFailure,
    },

    /// Two markings claim the same delegate type
    #[error("Ambiguous marking for {delegate}: {second} conflicts with {first}")]
    AmbiguousMarking {
        /// Contested delegate type
        delegate: String,
        /// Marking registered first
        first: String,
        /// Conflicting marking
        second: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Registration-time error creation methods
impl Error {
    /// Create an invalid factory signature error
    pub fn invalid_factory<S: Into<String>>(owner: TypeMeta, method: &str, message: S) -> Self {
        Self::InvalidFactorySignature {
            owner: owner.to_string(),
            method: method.to_string(),
            message: message.into(),
        }
    }

    /// Create a signature mismatch error
    pub fn signature_mismatch(
        owner: TypeMeta,
        method: &str,
        delegate: TypeMeta,
        expected: &DelegateSignature,
        actual: &DelegateSignature,
    ) -> Self {
        Self::SignatureMismatch {
            owner: owner.to_string(),
            method: method.to_string(),
            delegate: delegate.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an ambiguous marking error
    pub fn ambiguous_marking(
        first: &DelegateBindingDescriptor,
        second: &DelegateBindingDescriptor,
    ) -> Self {
        Self::AmbiguousMarking {
            delegate: second.delegate().to_string(),
            first: first.to_string(),
            second: second.to_string(),
        }
    }
}

// Resolution-time error creation methods
impl Error {
    /// Create a dependency resolution error
    pub fn resolution(service: TypeMeta, reason: ResolutionFailure) -> Self {
        Self::DependencyResolution {
            service: service.to_string(),
            reason,
        }
    }

    /// Nothing registered for `service`
    pub fn not_registered(service: TypeMeta) -> Self {
        Self::resolution(service, ResolutionFailure::NotRegistered)
    }

    /// `service` is registered for static scanning only
    pub fn not_activatable(service: TypeMeta) -> Self {
        Self::resolution(service, ResolutionFailure::NotActivatable)
    }

    /// `service` depends on itself
    pub fn circular(service: TypeMeta, path: &[TypeMeta]) -> Self {
        let path = path
            .iter()
            .chain(std::iter::once(&service))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::resolution(service, ResolutionFailure::Circular { path })
    }

    /// The value produced for `service` has an unexpected type
    pub fn type_mismatch(service: TypeMeta) -> Self {
        Self::resolution(
            service,
            ResolutionFailure::TypeMismatch {
                expected: service.to_string(),
            },
        )
    }

    /// Whether this is a resolution-time failure
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::DependencyResolution { .. })
    }
}

// Ambient error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
