use std::sync::Arc;
use std::thread;
use wirebox_di::instance_provider::{ServiceInstancePtr, TypedServiceInstanceProvider};
use wirebox_di::service_registry::{RegistrationPolicy, ServiceCollection};

struct Clock {
    timezone: String,
}

struct Reporter {
    clock: ServiceInstancePtr<Clock>,
}

#[test]
fn should_resolve_dependencies_through_scope() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton_value(Clock {
            timezone: "UTC".to_string(),
        })
        .add_scoped_factory(|provider| {
            provider
                .instance_typed::<Clock>()
                .map(|clock| Reporter { clock })
        });

    let provider = services.build();
    let mut scope = provider.create_scope();

    let reporter = scope.instance_typed::<Reporter>().unwrap();
    assert_eq!(reporter.clock.timezone, "UTC");

    let clock = scope.instance_typed::<Clock>().unwrap();
    assert!(ServiceInstancePtr::ptr_eq(&reporter.clock, &clock));
}

#[test]
fn should_resolve_last_registered_value() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton_value(Clock {
            timezone: "UTC".to_string(),
        })
        .add_singleton_value(Clock {
            timezone: "CET".to_string(),
        });

    let provider = services.build();
    let clock = provider
        .create_scope()
        .instance_typed::<Clock>()
        .unwrap();

    assert_eq!(clock.timezone, "CET");
}

#[test]
fn should_resolve_first_registered_value_with_policy() {
    let mut services = ServiceCollection::with_policy(RegistrationPolicy::FirstWins);
    services
        .add_singleton_value(Clock {
            timezone: "UTC".to_string(),
        })
        .add_singleton_value(Clock {
            timezone: "CET".to_string(),
        });

    let provider = services.build();
    let clock = provider
        .create_scope()
        .instance_typed::<Clock>()
        .unwrap();

    assert_eq!(clock.timezone, "UTC");
}

#[test]
fn should_share_singletons_between_threads() {
    let mut services = ServiceCollection::new();
    services.add_singleton_factory(|_| {
        Ok(Clock {
            timezone: "UTC".to_string(),
        })
    });

    let provider = services.build();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = provider.clone();
            thread::spawn(move || {
                provider
                    .create_scope()
                    .instance_typed::<Clock>()
                    .unwrap()
            })
        })
        .collect();

    let instances: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }
}

#[test]
fn should_report_missing_service_as_none() {
    let provider = ServiceCollection::new().build();
    let mut scope = provider.create_scope();

    assert!(scope.instance_option::<Clock>().unwrap().is_none());
}
