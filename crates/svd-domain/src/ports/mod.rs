//! Ports
//!
//! Contracts the delegate binders need from the dependency registry.
//! Registry implementations live outside the domain layer.

pub mod registry;

pub use registry::{
    AnyInstance, ComponentRegistry, Producer, ProducerRegistration, RegistrationHook, Resolver,
    ResolverExt, downcast_instance,
};
