//! Service export through the container
//!
//! An instance method of a registered component is resolvable as a
//! delegate bound to one instance of that component.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use svd_application::{BindingCatalog, ExportedMethod, delegate, delegate_factory, export_delegate};
use svd_infrastructure::{ContainerBuilder, DelegateConfig};

delegate! {
    pub struct GetGreeting = fn(name: String) -> String;
    pub struct WhoAmI = fn() -> usize;
    pub struct Farewell = fn(name: String) -> String;
    pub struct Polite = fn(name: String) -> String;
    pub struct Multiply = fn(left: i32, right: i32) -> i32;
    pub struct Welcome = fn(name: String) -> String;
    pub struct DeskSign = fn() -> String;
}

struct GreetingService;

impl GreetingService {
    fn get_greeting(&self, name: String) -> String {
        format!("Hello {name}!")
    }
}

export_delegate!(GreetingService, get_greeting => GetGreeting);

/// Every construction gets the next id from the shared counter
struct Identified {
    id: usize,
}

impl Identified {
    fn who_am_i(&self) -> usize {
        self.id
    }
}

export_delegate!(Identified, who_am_i => WhoAmI);

struct Doorman {
    name: &'static str,
}

impl Doorman {
    fn farewell(&self, name: String) -> String {
        format!("Goodbye {name}, says {}", self.name)
    }
}

export_delegate!(Doorman, farewell => Farewell, lifetime = Singleton);
export_delegate!(Doorman, farewell => Polite);

struct Calculator;

impl Calculator {
    fn multiply(&self, left: i32, right: i32) -> i32 {
        left * right
    }
}

/// Declares a factory and an export
struct Concierge;

impl Concierge {
    fn desk_sign() -> DeskSign {
        DeskSign::new(|| "Front desk".to_string())
    }

    fn welcome(&self, name: String) -> String {
        format!("Welcome {name}!")
    }
}

delegate_factory!(Concierge, desk_sign);
export_delegate!(Concierge, welcome => Welcome);

fn identified_builder(ids: &Arc<AtomicUsize>) -> ContainerBuilder {
    let ids = Arc::clone(ids);
    let mut builder = ContainerBuilder::new();
    builder.register_service_delegates();
    builder.register_type(move |_| {
        Ok(Identified {
            id: ids.fetch_add(1, Ordering::SeqCst),
        })
    });
    builder
}

#[test]
fn test_exported_method_is_resolvable_as_delegate() {
    let mut builder = ContainerBuilder::new();
    builder.register_service_delegates();
    builder.register_type(|_| Ok(GreetingService));
    let container = builder.build().unwrap();

    let greeting = container.resolve::<GetGreeting>().unwrap();

    assert_eq!(greeting.call("Max".to_string()), "Hello Max!");
}

#[test]
fn test_hook_installed_after_component_still_scans_it() {
    let mut builder = ContainerBuilder::new();
    builder.register_type(|_| Ok(GreetingService));
    builder.register_service_delegates();
    let container = builder.build().unwrap();

    assert!(container.is_registered::<GetGreeting>());
}

#[test]
fn test_factory_holder_registered_again_as_component_exports() {
    let mut builder = ContainerBuilder::new();
    builder.register_delegate_factories::<Concierge>();
    builder.register_type(|_| Ok(Concierge));
    let container = builder.build().unwrap();

    assert!(container.is_registered::<Concierge>());
    assert_eq!(container.resolve::<DeskSign>().unwrap().call(), "Front desk");
    let welcome = container.resolve::<Welcome>().unwrap();
    assert_eq!(welcome.call("Max".to_string()), "Welcome Max!");
}

#[test]
fn test_component_registered_before_factory_holder_exports() {
    let mut builder = ContainerBuilder::new();
    builder.register_type(|_| Ok(Concierge));
    builder.register_delegate_factories::<Concierge>();
    let container = builder.build().unwrap();

    assert!(container.is_registered::<Concierge>());
    assert!(container.is_registered::<DeskSign>());
    assert!(container.is_registered::<Welcome>());
}

#[test]
fn test_delegate_calls_observe_one_instance() {
    let ids = Arc::new(AtomicUsize::new(0));
    let container = identified_builder(&ids).build().unwrap();

    let who = container.resolve::<WhoAmI>().unwrap();

    assert_eq!(who.call(), who.call());
    assert_eq!(ids.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_component_rebinds_per_resolution() {
    let ids = Arc::new(AtomicUsize::new(0));
    let container = identified_builder(&ids).build().unwrap();

    let first = container.resolve::<WhoAmI>().unwrap();
    let second = container.resolve::<WhoAmI>().unwrap();

    assert_ne!(first.call(), second.call());
    assert_eq!(ids.load(Ordering::SeqCst), 2);
}

#[test]
fn test_singleton_component_is_shared_by_delegates() {
    let ids = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ids);

    let mut builder = ContainerBuilder::new();
    builder.register_service_delegates();
    builder
        .register_type(move |_| {
            Ok(Identified {
                id: counter.fetch_add(1, Ordering::SeqCst) + 10,
            })
        })
        .singleton();
    let container = builder.build().unwrap();

    let first = container.resolve::<WhoAmI>().unwrap();
    let second = container.resolve::<WhoAmI>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.call(), 10);
    assert_eq!(second.call(), 10);
    assert_eq!(ids.load(Ordering::SeqCst), 1);
}

#[test]
fn test_one_method_exported_as_several_delegates() {
    let mut builder = ContainerBuilder::new();
    builder.register_service_delegates();
    builder.register_instance(Doorman { name: "Alfred" });
    let container = builder.build().unwrap();

    let farewell = container.resolve::<Farewell>().unwrap();
    let polite = container.resolve::<Polite>().unwrap();

    assert_eq!(farewell.call("Max".to_string()), "Goodbye Max, says Alfred");
    assert_eq!(polite.call("Max".to_string()), farewell.call("Max".to_string()));

    let again = container.resolve::<Farewell>().unwrap();
    assert!(Arc::ptr_eq(&farewell, &again));
    let polite_again = container.resolve::<Polite>().unwrap();
    assert!(!Arc::ptr_eq(&polite, &polite_again));
}

#[test]
fn test_explicit_catalog_exports_unmarked_method() {
    let catalog = BindingCatalog::new().with_export::<Calculator, Multiply>(
        ExportedMethod::new("multiply", Calculator::multiply),
        None,
    );

    let mut builder = ContainerBuilder::new();
    builder.register_service_delegates_with(catalog);
    builder.register_type(|_| Ok(Calculator));
    builder.register_type(|_| Ok(GreetingService));
    let container = builder.build().unwrap();

    let multiply = container.resolve::<Multiply>().unwrap();
    assert_eq!(multiply.call(6, 7), 42);
    assert!(!container.is_registered::<GetGreeting>());
}

#[test]
fn test_discovery_can_be_disabled() {
    let mut builder = ContainerBuilder::with_config(DelegateConfig {
        discover_markings: false,
        ..DelegateConfig::default()
    });
    builder.register_service_delegates();
    builder.register_type(|_| Ok(GreetingService));
    let container = builder.build().unwrap();

    assert!(container.is_registered::<GreetingService>());
    assert!(!container.is_registered::<GetGreeting>());
}

#[test]
fn test_missing_component_surfaces_at_resolution() {
    let mut builder = ContainerBuilder::new();
    builder.register_service_delegates();
    builder.register_delegate_factories::<GreetingService>();
    let container = builder.build().unwrap();

    assert!(!container.is_registered::<GetGreeting>());
    let err = container.resolve::<GetGreeting>().unwrap_err();
    assert!(err.is_resolution_error());
}
