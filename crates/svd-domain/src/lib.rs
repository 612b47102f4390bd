//! Domain Layer - Service Delegates
//!
//! Core types shared by every layer of the delegate synthesis system.
//! This crate has no knowledge of how components are stored or activated;
//! it only describes delegates, their signatures and the contract a registry
//! has to fulfil so delegates can be produced on top of it.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`delegate`] | The [`Delegate`] trait implemented by every delegate type |
//! | [`value_objects`] | Type metadata, signatures, lifetimes and binding descriptors |
//! | [`ports`] | Registry contract (resolver, producer registry, registration hook) |
//! | [`error`] | Error taxonomy and `Result` alias |

pub mod delegate;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use delegate::Delegate;
pub use error::{Error, ResolutionFailure, Result};
pub use value_objects::*;
