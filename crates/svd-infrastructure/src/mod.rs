//! Infrastructure Layer - Service Delegates
//!
//! Cross-cutting concerns and a reference registry for the delegate
//! binders.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`container`] | `ContainerBuilder`, `Container` and resolution scopes |
//! | [`config`] | Figment-based configuration loading |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`error_ext`] | Context helpers converting foreign errors |
//! | [`constants`] | Configuration and logging constants |

pub mod config;
pub mod constants;
pub mod container;
pub mod error_ext;
pub mod logging;

pub use config::{ConfigLoader, ContainerConfig, DelegateConfig, LoggingConfig};
pub use container::{ComponentHandle, Container, ContainerBuilder};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
