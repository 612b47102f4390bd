//! Configuration
//!
//! Container and logging settings, loaded with Figment from defaults, an
//! optional TOML file and `SVD_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{ContainerConfig, DelegateConfig, LoggingConfig};
