//! Factory composition through the container
//!
//! A static method composes a delegate out of other resolved services.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use svd_application::{delegate, delegate_factory};
use svd_domain::Lifetime;
use svd_infrastructure::{ContainerBuilder, DelegateConfig};

delegate! {
    /// Greets one person by name
    pub struct GetGreeting = fn(name: String) -> String;

    /// Greets every person in `ids`
    pub struct GetGreetings = fn(ids: Vec<u32>) -> String;

    pub struct NextTicket = fn() -> usize;

    pub struct SessionTag = fn() -> String;
}

#[derive(Debug)]
struct PersonServices;

impl PersonServices {
    fn compose(get_greeting: Arc<GetGreeting>, persons: Arc<PersonRepository>) -> GetGreetings {
        GetGreetings::new(move |ids| {
            persons
                .names(&ids)
                .into_iter()
                .map(|name| get_greeting.call(name))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

delegate_factory!(PersonServices, compose);

#[derive(Default)]
struct PersonRepository;

impl PersonRepository {
    fn names(&self, ids: &[u32]) -> Vec<String> {
        ids.iter().map(|id| format!("Person {id}")).collect()
    }
}

/// Counts how often the ticket factory runs
#[derive(Default)]
struct Compositions(AtomicUsize);

struct TicketServices;

impl TicketServices {
    fn compose(compositions: Arc<Compositions>) -> NextTicket {
        compositions.0.fetch_add(1, Ordering::SeqCst);
        let issued = Arc::new(AtomicUsize::new(0));
        NextTicket::new(move || issued.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

delegate_factory!(TicketServices, compose, lifetime = Singleton);

struct Session {
    id: usize,
}

struct SessionServices;

impl SessionServices {
    fn compose(session: Arc<Session>) -> SessionTag {
        SessionTag::new(move || format!("session-{}", session.id))
    }
}

delegate_factory!(SessionServices, compose, lifetime = Scoped);

fn greeting_builder() -> ContainerBuilder {
    let mut builder = ContainerBuilder::new();
    builder.register_delegate_factories::<PersonServices>();
    builder.register_instance(GetGreeting::new(|name| format!("Hello {name}!")));
    builder.register_instance(PersonRepository);
    builder
}

#[test]
fn test_factory_composes_delegate_from_resolved_parameters() {
    let container = greeting_builder().build().unwrap();

    let greetings = container.resolve::<GetGreetings>().unwrap();

    assert_eq!(greetings.call(vec![1, 2]), "Hello Person 1! Hello Person 2!");
}

#[test]
fn test_factory_owner_is_not_resolvable() {
    let container = greeting_builder().build().unwrap();

    assert!(container.is_registered::<GetGreetings>());
    assert!(!container.is_registered::<PersonServices>());

    let err = container.resolve::<PersonServices>().unwrap_err();
    assert!(err.is_resolution_error());
    assert!(err.to_string().contains("static delegate factories only"), "{err}");
}

#[test]
fn test_factory_delegates_are_transient_by_default() {
    let container = greeting_builder().build().unwrap();

    let first = container.resolve::<GetGreetings>().unwrap();
    let second = container.resolve::<GetGreetings>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_configured_default_lifetime_applies_to_factories() {
    let mut builder = ContainerBuilder::with_config(DelegateConfig {
        default_lifetime: Lifetime::Singleton,
        ..DelegateConfig::default()
    });
    builder.register_delegate_factories::<PersonServices>();
    builder.register_instance(GetGreeting::new(|name| format!("Hi {name}")));
    builder.register_default::<PersonRepository>();
    let container = builder.build().unwrap();

    let first = container.resolve::<GetGreetings>().unwrap();
    let second = container.resolve::<GetGreetings>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.call(vec![3]), "Hi Person 3");
}

#[test]
fn test_singleton_marking_composes_once() {
    let mut builder = ContainerBuilder::new();
    builder.register_delegate_factories::<TicketServices>();
    builder.register_default::<Compositions>().singleton();
    let container = builder.build().unwrap();

    let first = container.resolve::<NextTicket>().unwrap();
    let second = container.resolve::<NextTicket>().unwrap();

    assert_eq!(first.call(), 1);
    assert_eq!(second.call(), 2);
    let compositions = container.resolve::<Compositions>().unwrap();
    assert_eq!(compositions.0.load(Ordering::SeqCst), 1);
}

#[test]
fn test_scoped_marking_composes_once_per_scope() {
    let sessions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&sessions);

    let mut builder = ContainerBuilder::new();
    builder.register_delegate_factories::<SessionServices>();
    builder
        .register_type(move |_| {
            Ok(Session {
                id: counter.fetch_add(1, Ordering::SeqCst),
            })
        })
        .scoped();
    let container = builder.build().unwrap();

    let scope = container.begin_scope();
    let first = scope.resolve::<SessionTag>().unwrap();
    let again = scope.resolve::<SessionTag>().unwrap();
    let other = container.begin_scope().resolve::<SessionTag>().unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(first.call(), again.call());
    assert_ne!(first.call(), other.call());
    assert_eq!(sessions.load(Ordering::SeqCst), 2);
}

#[test]
fn test_missing_factory_parameter_names_the_type() {
    let mut builder = ContainerBuilder::new();
    builder.register_delegate_factories::<PersonServices>();
    builder.register_instance(GetGreeting::new(|name| name));
    let container = builder.build().unwrap();

    let err = container.resolve::<GetGreetings>().unwrap_err();

    assert!(err.is_resolution_error());
    assert!(err.to_string().contains("PersonRepository"), "{err}");
}
