//! Marking macros
//!
//! Each macro expands to one `linkme` registry entry inside an anonymous
//! `const` block, so a module can hold any number of markings.

/// Declare one or more delegate types
///
/// ```ignore
/// delegate! {
///     /// Builds a greeting for a name
///     pub struct Greet = fn(name: String) -> String;
/// }
///
/// let greet = Greet::new(|name| format!("Hello {name}!"));
/// assert_eq!(greet.call("Max".into()), "Hello Max!");
/// ```
///
/// The generated type implements [`Delegate`](svd_domain::Delegate) and is
/// registered as a delegate type, so factory composition methods may return
/// it.
#[macro_export]
macro_rules! delegate {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = fn($($arg:ident : $ty:ty),* $(,)?) -> $out:ty;
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Clone)]
            $vis struct $name($crate::__private::DelegateFn<($($ty,)*), $out>);

            #[allow(dead_code)]
            impl $name {
                /// Wrap a closure with this delegate's signature
                pub fn new<F>(f: F) -> Self
                where
                    F: Fn($($ty),*) -> $out + Send + Sync + 'static,
                {
                    Self(::std::sync::Arc::new(move |($($arg,)*): ($($ty,)*)| f($($arg),*)))
                }

                /// Invoke the delegate
                pub fn call(&self, $($arg: $ty),*) -> $out {
                    (self.0)(($($arg,)*))
                }
            }

            impl ::std::fmt::Debug for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    ::core::write!(
                        f,
                        "{}({})",
                        stringify!($name),
                        <$name as $crate::__private::Delegate>::signature()
                    )
                }
            }

            impl $crate::__private::Delegate for $name {
                type Args = ($($ty,)*);
                type Output = $out;

                fn from_fn(f: $crate::__private::DelegateFn<Self::Args, Self::Output>) -> Self {
                    Self(f)
                }

                fn invoke(&self, args: Self::Args) -> Self::Output {
                    (self.0)(args)
                }
            }

            $crate::declare_delegate_type!($name);
        )+
    };
}

/// Register a hand-written [`Delegate`](svd_domain::Delegate) implementation
/// as a delegate type
#[macro_export]
macro_rules! declare_delegate_type {
    ($delegate:ty) => {
        const _: () = {
            #[$crate::__private::linkme::distributed_slice($crate::registry::DELEGATE_TYPES)]
            #[linkme(crate = $crate::__private::linkme)]
            static ENTRY: $crate::registry::DelegateTypeEntry = $crate::registry::DelegateTypeEntry {
                delegate: || $crate::__private::TypeMeta::of::<$delegate>(),
                signature: || <$delegate as $crate::__private::Delegate>::signature(),
            };
        };
    };
}

/// Mark an associated function as a factory composition method
///
/// ```ignore
/// impl PersonServices {
///     fn compose(get_greeting: Arc<GetGreeting>, persons: Arc<PersonRepository>) -> GetGreetings {
///         ...
///     }
/// }
///
/// delegate_factory!(PersonServices, compose);
/// delegate_factory!(PersonServices, compose_cached, lifetime = Singleton);
/// ```
///
/// Every parameter is resolved from the registry on each production; the
/// return type must be a declared delegate type.
#[macro_export]
macro_rules! delegate_factory {
    ($owner:ty, $method:ident $(, lifetime = $lifetime:ident)? $(,)?) => {
        const _: () = {
            #[$crate::__private::linkme::distributed_slice($crate::registry::DELEGATE_FACTORIES)]
            #[linkme(crate = $crate::__private::linkme)]
            static ENTRY: $crate::registry::DelegateFactoryEntry =
                $crate::registry::DelegateFactoryEntry {
                    lifetime: $crate::__optional_lifetime!($($lifetime)?),
                    factory: || {
                        $crate::factory::FactoryMethod::new(
                            $crate::__private::TypeMeta::of::<$owner>(),
                            stringify!($method),
                            <$owner>::$method,
                        )
                    },
                };
        };
    };
}

/// Mark an instance method for export as a delegate
///
/// ```ignore
/// impl Greeter {
///     fn greet(&self, name: String) -> String { ... }
/// }
///
/// export_delegate!(Greeter, greet => Greet);
/// ```
///
/// The method's parameters after `&self` and its return type must match the
/// delegate exactly; a mismatch fails the container build.
#[macro_export]
macro_rules! export_delegate {
    ($owner:ty, $method:ident => $delegate:ty $(, lifetime = $lifetime:ident)? $(,)?) => {
        const _: () = {
            #[$crate::__private::linkme::distributed_slice($crate::registry::SERVICE_DELEGATES)]
            #[linkme(crate = $crate::__private::linkme)]
            static ENTRY: $crate::registry::ServiceDelegateEntry =
                $crate::registry::ServiceDelegateEntry {
                    owner: || $crate::__private::TypeMeta::of::<$owner>(),
                    method: stringify!($method),
                    delegate: || $crate::__private::TypeMeta::of::<$delegate>(),
                    lifetime: $crate::__optional_lifetime!($($lifetime)?),
                    export: || $crate::export::ExportedMethod::new(stringify!($method), <$owner>::$method),
                    bind: $crate::export::ServiceDelegateBinder::bind::<$owner, $delegate>,
                };
        };
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __optional_lifetime {
    () => {
        ::core::option::Option::None
    };
    ($lifetime:ident) => {
        ::core::option::Option::Some($crate::__private::Lifetime::$lifetime)
    };
}
