//! Service Delegate Binder
//!
//! Exposes an instance method of a registered component as a standalone
//! delegate. The producer resolves the component once and the delegate
//! closes over that instance, so calling the delegate never goes back to the
//! registry.
//!
//! Signature checking happens when the export is bound: the method is stored
//! as a `BoundMethod<T, A, R>` behind `dyn Any` and only downcasts when
//! `A` and `R` are exactly the delegate's argument and return types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use svd_domain::ports::{AnyInstance, Producer, Resolver, ResolverExt};
use svd_domain::{
    BindingKind, Delegate, DelegateBindingDescriptor, DelegateSignature, Error, Lifetime,
    ParameterList, Result, TypeMeta,
};
use tracing::{debug, trace};

use crate::factory::BoundProducer;

/// An instance method taking its arguments as a tuple
pub type BoundMethod<T, A, R> = Arc<dyn Fn(&T, A) -> R + Send + Sync>;

/// Functions usable as exported instance methods
///
/// Implemented for every `Fn(&T, A1, .., An) -> R` with up to eight
/// parameters after the receiver.
pub trait MethodFn<T, A, R>: Send + Sync + 'static {
    /// Convert into a tuple-taking method
    fn into_bound(self) -> BoundMethod<T, A, R>;
}

macro_rules! impl_method_fn {
    ($($ty:ident),*) => {
        impl<F, T, R, $($ty,)*> MethodFn<T, ($($ty,)*), R> for F
        where
            F: Fn(&T $(, $ty)*) -> R + Send + Sync + 'static,
            T: 'static,
            R: 'static,
            $($ty: 'static,)*
        {
            #[allow(non_snake_case)]
            fn into_bound(self) -> BoundMethod<T, ($($ty,)*), R> {
                Arc::new(move |target: &T, ($($ty,)*): ($($ty,)*)| (self)(target $(, $ty)*))
            }
        }
    };
}

impl_method_fn!();
impl_method_fn!(A1);
impl_method_fn!(A1, A2);
impl_method_fn!(A1, A2, A3);
impl_method_fn!(A1, A2, A3, A4);
impl_method_fn!(A1, A2, A3, A4, A5);
impl_method_fn!(A1, A2, A3, A4, A5, A6);
impl_method_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_method_fn!(A1, A2, A3, A4, A5, A6, A7, A8);

/// A type-erased instance method marked for export
#[derive(Clone)]
pub struct ExportedMethod {
    owner: TypeMeta,
    name: &'static str,
    signature: DelegateSignature,
    target: Arc<dyn Any + Send + Sync>,
}

impl ExportedMethod {
    /// Describe the method `T::name`
    pub fn new<T, A, R, F>(name: &'static str, f: F) -> Self
    where
        T: Send + Sync + 'static,
        A: ParameterList,
        R: 'static,
        F: MethodFn<T, A, R>,
    {
        Self {
            owner: TypeMeta::of::<T>(),
            name,
            signature: DelegateSignature::of::<A, R>(),
            target: Arc::new(f.into_bound()),
        }
    }

    /// Component type declaring the method
    pub fn owner(&self) -> TypeMeta {
        self.owner
    }

    /// Method name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter and return types, receiver excluded
    pub fn signature(&self) -> &DelegateSignature {
        &self.signature
    }

    /// The method as `BoundMethod<T, A, R>`, if those are its exact types
    pub fn bound<T: 'static, A: 'static, R: 'static>(&self) -> Option<BoundMethod<T, A, R>> {
        self.target.downcast_ref::<BoundMethod<T, A, R>>().cloned()
    }
}

impl fmt::Debug for ExportedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedMethod")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Binds exported instance methods to producers
pub struct ServiceDelegateBinder;

impl ServiceDelegateBinder {
    /// Check `method` against delegate `D` and build the producer for `D`
    ///
    /// The producer resolves `T` with whatever lifetime `T` is registered
    /// with, once per produced delegate.
    pub fn bind<T, D>(method: &ExportedMethod, lifetime: Lifetime) -> Result<BoundProducer>
    where
        T: Send + Sync + 'static,
        D: Delegate,
    {
        let owner = TypeMeta::of::<T>();
        let delegate = TypeMeta::of::<D>();
        let expected = D::signature();

        let target = method.bound::<T, D::Args, D::Output>().ok_or_else(|| {
            Error::signature_mismatch(
                method.owner(),
                method.name(),
                delegate,
                &expected,
                method.signature(),
            )
        })?;

        let descriptor = DelegateBindingDescriptor::new(
            owner,
            method.name(),
            delegate,
            BindingKind::ServiceExport,
        );

        debug!(export = %descriptor, %lifetime, "Bound service delegate");

        let producer: Producer = Arc::new(move |resolver: &dyn Resolver| {
            let instance = resolver.resolve::<T>()?;
            trace!(delegate = %delegate, service = %owner, "Binding service delegate");
            let target = Arc::clone(&target);
            let value = D::from_fn(Arc::new(move |args: D::Args| {
                target(instance.as_ref(), args)
            }));
            Ok(Arc::new(value) as AnyInstance)
        });

        Ok(BoundProducer::new(descriptor, lifetime, producer))
    }
}
