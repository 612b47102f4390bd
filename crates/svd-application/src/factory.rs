//! Factory Binder
//!
//! A factory composition method is a receiver-less function whose
//! parameters are all resolved from the registry and whose return value is a
//! delegate. The binder turns such a method into a [`Producer`] for the
//! returned delegate type:
//!
//! ```text
//! resolve::<GetGreetings>()
//!        ↓
//! Producer ── ResolutionPlan::execute() ──→ (Arc<GetGreeting>, Arc<PersonRepository>)
//!        ↓
//! PersonServices::compose(get_greeting, persons) ──→ GetGreetings
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use svd_domain::ports::{AnyInstance, Producer, ProducerRegistration, Resolver};
use svd_domain::{
    BindingKind, DelegateBindingDescriptor, DelegateSignature, Error, Lifetime, Result, TypeMeta,
};
use tracing::{debug, trace};

use crate::signature::{Injectable, SignatureResolver};

/// Functions usable as factory composition methods
///
/// Implemented for every `Fn(Arc<A1>, .., Arc<An>) -> R` with up to eight
/// parameters.
pub trait FactoryFn<P, R>: Send + Sync + 'static {
    /// Call the function with an already-resolved parameter tuple
    fn call(&self, params: P) -> R;
}

macro_rules! impl_factory_fn {
    ($($ty:ident),*) => {
        impl<F, R, $($ty,)*> FactoryFn<($(Arc<$ty>,)*), R> for F
        where
            F: Fn($(Arc<$ty>),*) -> R + Send + Sync + 'static,
            $($ty: Send + Sync + 'static,)*
        {
            #[allow(non_snake_case)]
            fn call(&self, ($($ty,)*): ($(Arc<$ty>,)*)) -> R {
                (self)($($ty),*)
            }
        }
    };
}

impl_factory_fn!();
impl_factory_fn!(A1);
impl_factory_fn!(A1, A2);
impl_factory_fn!(A1, A2, A3);
impl_factory_fn!(A1, A2, A3, A4);
impl_factory_fn!(A1, A2, A3, A4, A5);
impl_factory_fn!(A1, A2, A3, A4, A5, A6);
impl_factory_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_factory_fn!(A1, A2, A3, A4, A5, A6, A7, A8);

type ErasedFactory = Arc<dyn Fn(Vec<AnyInstance>) -> Result<AnyInstance> + Send + Sync>;

/// A type-erased factory composition method
#[derive(Clone)]
pub struct FactoryMethod {
    owner: TypeMeta,
    name: &'static str,
    signature: DelegateSignature,
    invoke: ErasedFactory,
}

impl FactoryMethod {
    /// Describe the factory `owner::name`
    pub fn new<P, R, F>(owner: TypeMeta, name: &'static str, f: F) -> Self
    where
        P: Injectable,
        R: Send + Sync + 'static,
        F: FactoryFn<P, R>,
    {
        let invoke: ErasedFactory = Arc::new(move |values| {
            let params = P::from_resolved(values)?;
            Ok(Arc::new(f.call(params)) as AnyInstance)
        });

        Self {
            owner,
            name,
            signature: DelegateSignature::new(P::parameter_types(), TypeMeta::of::<R>()),
            invoke,
        }
    }

    /// Type declaring the factory
    pub fn owner(&self) -> TypeMeta {
        self.owner
    }

    /// Method name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter and return types
    pub fn signature(&self) -> &DelegateSignature {
        &self.signature
    }

    /// Type of the composed value
    pub fn output(&self) -> TypeMeta {
        self.signature.output()
    }

    /// Binding descriptor for this method
    pub fn descriptor(&self) -> DelegateBindingDescriptor {
        DelegateBindingDescriptor::new(
            self.owner,
            self.name,
            self.output(),
            BindingKind::FactoryComposition,
        )
    }
}

impl fmt::Debug for FactoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryMethod")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A producer ready to be registered for a delegate type
#[derive(Clone)]
pub struct BoundProducer {
    descriptor: DelegateBindingDescriptor,
    lifetime: Lifetime,
    producer: Producer,
}

impl BoundProducer {
    pub(crate) fn new(
        descriptor: DelegateBindingDescriptor,
        lifetime: Lifetime,
        producer: Producer,
    ) -> Self {
        Self {
            descriptor,
            lifetime,
            producer,
        }
    }

    /// Where the producer comes from
    pub fn descriptor(&self) -> &DelegateBindingDescriptor {
        &self.descriptor
    }

    /// Lifetime the delegate is registered with
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// The producer function
    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    /// Convert into a registry registration for the delegate type
    pub fn into_registration(self) -> ProducerRegistration {
        ProducerRegistration::new(self.descriptor.delegate(), self.lifetime, self.producer)
            .with_origin(self.descriptor.to_string())
    }
}

impl fmt::Debug for BoundProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundProducer")
            .field("descriptor", &self.descriptor)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

/// Binds factory composition methods to producers
#[derive(Debug, Clone, Default)]
pub struct FactoryBinder {
    delegate_types: HashSet<TypeMeta>,
}

impl FactoryBinder {
    /// Binder accepting factories that return one of `delegate_types`
    pub fn new(delegate_types: impl IntoIterator<Item = TypeMeta>) -> Self {
        Self {
            delegate_types: delegate_types.into_iter().collect(),
        }
    }

    /// Whether `ty` is a known delegate type
    pub fn is_delegate_type(&self, ty: TypeMeta) -> bool {
        self.delegate_types.contains(&ty)
    }

    /// Validate `method` and build the producer for its delegate type
    pub fn bind(&self, method: &FactoryMethod, lifetime: Lifetime) -> Result<BoundProducer> {
        let output = method.output();

        if !self.is_delegate_type(output) {
            return Err(Error::invalid_factory(
                method.owner(),
                method.name(),
                format!("return type `{output}` is not a delegate type"),
            ));
        }

        if method.signature().parameters().contains(&output) {
            return Err(Error::invalid_factory(
                method.owner(),
                method.name(),
                format!("the factory depends on `{output}`, the delegate type it produces"),
            ));
        }

        let plan = SignatureResolver::plan(method.signature().parameters());
        let invoke = Arc::clone(&method.invoke);
        let descriptor = method.descriptor();

        debug!(
            factory = %descriptor,
            parameters = plan.len(),
            %lifetime,
            "Bound delegate factory"
        );

        let producer: Producer = Arc::new(move |resolver: &dyn Resolver| {
            trace!(delegate = %output, "Composing delegate");
            let values = plan.execute(resolver)?;
            invoke(values)
        });

        Ok(BoundProducer::new(descriptor, lifetime, producer))
    }
}
