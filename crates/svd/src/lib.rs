//! # Service Delegates
//!
//! Resolvable delegates for a dependency-injection registry.
//!
//! A *delegate* is a named function type. Instead of resolving a whole
//! service to call one method on it, a consumer resolves just the callable
//! it needs. Delegates come from two kinds of markings:
//!
//! - **Factory composition**: an associated function whose parameters are
//!   resolved from the registry and whose return value is the delegate.
//! - **Service export**: an instance method of a registered component,
//!   bound to one resolved instance.
//!
//! ## Example
//!
//! ```ignore
//! use svd::prelude::*;
//!
//! delegate! {
//!     pub struct GetGreeting = fn(name: String) -> String;
//! }
//!
//! struct GreetingService;
//!
//! impl GreetingService {
//!     fn get_greeting(&self, name: String) -> String {
//!         format!("Hello {name}!")
//!     }
//! }
//!
//! export_delegate!(GreetingService, get_greeting => GetGreeting);
//!
//! let mut builder = ContainerBuilder::new();
//! builder.register_service_delegates();
//! builder.register_type(|_| Ok(GreetingService));
//! let container = builder.build()?;
//!
//! let greet = container.resolve::<GetGreeting>()?;
//! assert_eq!(greet.call("Max".into()), "Hello Max!");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - delegate trait, signatures, lifetimes, errors and registry ports
//! - `application` - binders, registration hook, markings and their macros
//! - `infrastructure` - reference container, configuration and logging

/// Domain layer - delegate types, value objects and registry ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use svd_domain::*;
}

/// Application layer - binders, registration hook and markings
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use svd_application::*;
}

/// Infrastructure layer - container, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use svd_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Marking macros
pub use svd_application::{declare_delegate_type, delegate, delegate_factory, export_delegate};

// Re-export container types for convenience
pub use infrastructure::{ConfigLoader, Container, ContainerBuilder, ContainerConfig};

/// Everything needed to declare, mark and resolve delegates
pub mod prelude {
    pub use svd_application::BindingCatalog;
    pub use svd_application::{declare_delegate_type, delegate, delegate_factory, export_delegate};
    pub use svd_domain::ports::{Resolver, ResolverExt};
    pub use svd_domain::{Delegate, Error, Lifetime, Result};
    pub use svd_infrastructure::{Container, ContainerBuilder};
}
