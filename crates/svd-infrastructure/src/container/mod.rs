//! Reference Container
//!
//! A small registry implementing the ports the delegate binders rely on.
//! Registration and resolution are separate phases:
//!
//! ```text
//! ContainerBuilder                          Container
//! ────────────────                          ─────────
//! register_type / register_instance         resolve::<T>()
//! register_delegate_factories                    ↓
//! register_service_delegates (hook)         RegistrationTable lookup
//!        ↓ build()                               ↓
//! hooks attach once per component           lifetime cache (singleton / scoped)
//!        ↓                                       ↓
//! RegistrationTable (frozen)  ───────────→  Producer(&ResolutionContext)
//! ```
//!
//! Singletons are cached at the root. Each scope caches its own scoped
//! values; the root container acts as its own scope. All caches of a
//! container share one wait graph, so threads producing services that
//! depend on each other fail with a circular dependency instead of
//! deadlocking.

pub mod builder;
pub mod cache;
pub mod scope;
pub mod table;
pub mod waits;

pub use builder::{ComponentHandle, ContainerBuilder};
pub use cache::InstanceCache;
pub use scope::Container;
pub use table::{RegistrationTable, ServiceEntry};
pub use waits::WaitGraph;
