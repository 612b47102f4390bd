//! Signature Resolver
//!
//! Converts a parameter list into an ordered plan of registry look-ups.
//! Planning has no side effects; failures only surface when the plan is
//! executed against a [`Resolver`].

use std::sync::Arc;

use svd_domain::ports::{AnyInstance, Resolver, downcast_instance};
use svd_domain::{Error, ParameterBinding, Result, TypeMeta};

/// "Resolve this type" for one parameter position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveRequest {
    binding: ParameterBinding,
}

impl ResolveRequest {
    /// Position of the parameter the request feeds
    pub fn position(&self) -> usize {
        self.binding.position
    }

    /// Service type to resolve
    pub fn service(&self) -> TypeMeta {
        self.binding.ty
    }
}

/// Ordered resolution requests, one per parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPlan {
    requests: Vec<ResolveRequest>,
}

impl ResolutionPlan {
    /// Requests in parameter order
    pub fn requests(&self) -> &[ResolveRequest] {
        &self.requests
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the method takes no parameters
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Resolve every request in order
    ///
    /// The first failure is returned as reported by the resolver.
    pub fn execute(&self, resolver: &dyn Resolver) -> Result<Vec<AnyInstance>> {
        self.requests
            .iter()
            .map(|request| resolver.resolve_any(request.service()))
            .collect()
    }
}

/// Builds resolution plans from parameter lists
pub struct SignatureResolver;

impl SignatureResolver {
    /// Plan for an explicit parameter list
    pub fn plan(parameters: &[TypeMeta]) -> ResolutionPlan {
        let requests = parameters
            .iter()
            .enumerate()
            .map(|(position, ty)| ResolveRequest {
                binding: ParameterBinding { position, ty: *ty },
            })
            .collect();
        ResolutionPlan { requests }
    }

    /// Plan for an injectable parameter tuple
    pub fn plan_for<P: Injectable>() -> ResolutionPlan {
        Self::plan(&P::parameter_types())
    }
}

/// Parameter tuples whose elements are all resolved from the registry
///
/// Implemented for tuples of `Arc<T>` of up to eight elements; the resolved
/// service of each element is `T`.
pub trait Injectable: Sized + Send + 'static {
    /// Service types in parameter order
    fn parameter_types() -> Vec<TypeMeta>;

    /// Rebuild the tuple from the values produced by a [`ResolutionPlan`]
    fn from_resolved(values: Vec<AnyInstance>) -> Result<Self>;
}

fn next_value<T: Send + Sync + 'static>(
    values: &mut std::vec::IntoIter<AnyInstance>,
) -> Result<Arc<T>> {
    let value = values.next().ok_or_else(|| {
        Error::internal(format!(
            "resolution plan ended before parameter `{}`",
            TypeMeta::of::<T>()
        ))
    })?;
    downcast_instance::<T>(value)
}

macro_rules! impl_injectable {
    ($($ty:ident),*) => {
        impl<$($ty: Send + Sync + 'static),*> Injectable for ($(Arc<$ty>,)*) {
            fn parameter_types() -> Vec<TypeMeta> {
                vec![$(TypeMeta::of::<$ty>()),*]
            }

            #[allow(unused_mut, unused_variables)]
            fn from_resolved(values: Vec<AnyInstance>) -> Result<Self> {
                let expected = Self::parameter_types().len();
                if values.len() != expected {
                    return Err(Error::internal(format!(
                        "expected {expected} resolved parameters, got {}",
                        values.len()
                    )));
                }
                let mut values = values.into_iter();
                Ok(($(next_value::<$ty>(&mut values)?,)*))
            }
        }
    };
}

impl_injectable!();
impl_injectable!(A1);
impl_injectable!(A1, A2);
impl_injectable!(A1, A2, A3);
impl_injectable!(A1, A2, A3, A4);
impl_injectable!(A1, A2, A3, A4, A5);
impl_injectable!(A1, A2, A3, A4, A5, A6);
impl_injectable!(A1, A2, A3, A4, A5, A6, A7);
impl_injectable!(A1, A2, A3, A4, A5, A6, A7, A8);
