//! Tests for the marking macros and link-time discovery
//!
//! Markings declared in this file are collected into the `linkme` slices of
//! `svd_application::registry` and must show up in every listing.

use std::sync::Arc;

use svd_application::registry::{list_delegate_bindings, list_delegate_types};
use svd_application::{BindingCatalog, delegate, delegate_factory, export_delegate};
use svd_domain::{BindingKind, Delegate, Lifetime, TypeMeta};

delegate! {
    /// Formats a temperature reading
    pub struct FormatReading = fn(celsius: f64) -> String;

    /// Sums two numbers
    struct Add = fn(left: i64, right: i64) -> i64;

    struct Tick = fn() -> u32;
}

struct Thermometer {
    unit: &'static str,
}

impl Thermometer {
    fn format(&self, celsius: f64) -> String {
        format!("{celsius:.1}{}", self.unit)
    }
}

export_delegate!(Thermometer, format => FormatReading, lifetime = Singleton);

struct Arithmetic;

impl Arithmetic {
    fn adder() -> Add {
        Add::new(|left, right| left + right)
    }

    fn ticker(start: Arc<u32>) -> Tick {
        let start = *start;
        Tick::new(move || start + 1)
    }
}

delegate_factory!(Arithmetic, adder);
delegate_factory!(Arithmetic, ticker, lifetime = Scoped);

#[test]
fn test_generated_delegate_calls_wrapped_closure() {
    let add = Add::new(|left, right| left * 10 + right);

    assert_eq!(add.call(4, 2), 42);
    assert_eq!(add.invoke((1, 1)), 11);
}

#[test]
fn test_generated_delegate_signature_and_debug() {
    assert_eq!(Add::signature().to_string(), "fn(i64, i64) -> i64");
    assert_eq!(Tick::signature().arity(), 0);

    let reading = FormatReading::new(|c| c.to_string());
    assert_eq!(format!("{reading:?}"), "FormatReading(fn(f64) -> String)");
}

#[test]
fn test_delegate_clones_share_closure() {
    let tick = Tick::new(|| 7);
    let copy = tick.clone();

    assert_eq!(tick.call(), copy.call());
}

#[test]
fn test_declared_delegates_are_listed() {
    let types: Vec<TypeMeta> = list_delegate_types().into_iter().map(|(ty, _)| ty).collect();

    for expected in [
        TypeMeta::of::<FormatReading>(),
        TypeMeta::of::<Add>(),
        TypeMeta::of::<Tick>(),
    ] {
        assert!(types.contains(&expected), "{expected} missing from {types:?}");
    }
}

#[test]
fn test_markings_are_listed_by_kind() {
    let bindings = list_delegate_bindings();

    let factories: Vec<String> = bindings
        .of_kind(BindingKind::FactoryComposition)
        .map(ToString::to_string)
        .collect();
    assert!(factories.contains(&"Arithmetic::adder => Add (factory composition)".to_string()));
    assert!(factories.contains(&"Arithmetic::ticker => Tick (factory composition)".to_string()));

    let exports: Vec<String> = bindings
        .of_kind(BindingKind::ServiceExport)
        .map(ToString::to_string)
        .collect();
    assert!(
        exports.contains(&"Thermometer::format => FormatReading (service export)".to_string())
    );

    let display = bindings.to_string();
    assert!(display.contains("Delegate Factories:"));
    assert!(display.contains("Service Delegates:"));
}

#[test]
fn test_discovered_catalog_keeps_lifetime_overrides() {
    let catalog = BindingCatalog::discover();
    let arithmetic = TypeMeta::of::<Arithmetic>();

    let lifetimes: Vec<(&str, Option<Lifetime>)> = catalog
        .factories_for(arithmetic)
        .map(|marking| (marking.method().name(), marking.lifetime()))
        .collect();
    assert!(lifetimes.contains(&("adder", None)));
    assert!(lifetimes.contains(&("ticker", Some(Lifetime::Scoped))));

    let export = catalog
        .exports_for(TypeMeta::of::<Thermometer>())
        .next()
        .expect("thermometer export discovered");
    assert_eq!(export.lifetime(), Some(Lifetime::Singleton));
    assert!(export.delegate().is::<FormatReading>());
    assert_eq!(export.method().signature().to_string(), "fn(f64) -> String");
}

#[test]
fn test_discovered_catalog_knows_delegate_types() {
    let catalog = BindingCatalog::discover();
    let types: Vec<TypeMeta> = catalog.delegate_types().collect();

    assert!(types.contains(&TypeMeta::of::<Add>()));
    assert!(!types.contains(&TypeMeta::of::<Thermometer>()));
    assert!(catalog.len() >= 3);
}

#[test]
fn test_exported_method_is_callable_through_marking() {
    let catalog = BindingCatalog::discover();
    let export = catalog
        .exports_for(TypeMeta::of::<Thermometer>())
        .next()
        .expect("thermometer export discovered");

    let method = export
        .method()
        .bound::<Thermometer, (f64,), String>()
        .expect("exact signature");
    let thermometer = Thermometer { unit: "°C" };

    assert_eq!(method(&thermometer, (21.04,)), "21.0°C");
}
