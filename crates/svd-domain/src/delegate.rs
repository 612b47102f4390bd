//! Delegate types
//!
//! A delegate is a named function signature treated as a first-class,
//! resolvable type. Delegate values are cheap to clone and wrap a shared
//! closure. Most delegate types are declared with the `delegate!` macro of
//! the application crate, which implements this trait.

use std::sync::Arc;

use crate::value_objects::{DelegateSignature, ParameterList};

/// Shared closure wrapped by a delegate value
pub type DelegateFn<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// A named callable type with a fixed signature
pub trait Delegate: Clone + Send + Sync + 'static {
    /// Parameter types as a tuple
    type Args: ParameterList;
    /// Return type
    type Output: 'static;

    /// Wrap a closure taking the argument tuple
    fn from_fn(f: DelegateFn<Self::Args, Self::Output>) -> Self;

    /// Invoke the delegate with an argument tuple
    fn invoke(&self, args: Self::Args) -> Self::Output;

    /// Signature every bound method must match
    fn signature() -> DelegateSignature {
        DelegateSignature::of::<Self::Args, Self::Output>()
    }
}
