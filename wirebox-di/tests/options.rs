use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wirebox_di::instance_provider::{ServiceInstancePtr, TypedServiceInstanceProvider};
use wirebox_di::options::OptionsRegistrationExt;
use wirebox_di::service_registry::ServiceCollection;

struct PublisherOptions {
    endpoint: String,
}

struct Publisher {
    options: ServiceInstancePtr<PublisherOptions>,
}

impl Publisher {
    fn new(options: ServiceInstancePtr<PublisherOptions>) -> Self {
        Self { options }
    }
}

struct SecretsVault;

impl SecretsVault {
    fn secret(&self, name: &str) -> String {
        format!("secret-{}", name)
    }
}

#[test]
fn should_resolve_service_with_fixed_options() {
    let mut services = ServiceCollection::new();
    services.register_fixed_options(
        PublisherOptions {
            endpoint: "hello".to_string(),
        },
        Publisher::new,
    );

    let provider = services.build();
    let publisher = provider
        .create_scope()
        .instance_typed::<Publisher>()
        .unwrap();

    assert_eq!(publisher.options.endpoint, "hello");
}

#[test]
fn should_resolve_service_with_factory_built_options() {
    let mut services = ServiceCollection::new();
    services
        .register_options_factory(|_| {
            Ok(PublisherOptions {
                endpoint: "from-factory".to_string(),
            })
        })
        .add_scoped_factory(|provider| {
            provider
                .instance_typed::<PublisherOptions>()
                .map(Publisher::new)
        });

    let provider = services.build();
    let publisher = provider
        .create_scope()
        .instance_typed::<Publisher>()
        .unwrap();

    assert_eq!(publisher.options.endpoint, "from-factory");
}

#[test]
fn should_let_options_factory_resolve_other_services() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton_value(SecretsVault)
        .register_options_factory(|provider| {
            let vault = provider.instance_typed::<SecretsVault>()?;
            Ok(PublisherOptions {
                endpoint: vault.secret("endpoint"),
            })
        })
        .add_scoped_factory(|provider| {
            provider
                .instance_typed::<PublisherOptions>()
                .map(Publisher::new)
        });

    let provider = services.build();
    let publisher = provider
        .create_scope()
        .instance_typed::<Publisher>()
        .unwrap();

    assert_eq!(publisher.options.endpoint, "secret-endpoint");
}

#[test]
fn should_invoke_options_factory_once_per_scope() {
    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = invocations.clone();

    let mut services = ServiceCollection::new();
    services.register_options_factory(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(PublisherOptions {
            endpoint: "counted".to_string(),
        })
    });

    let provider = services.build();

    let mut scope = provider.create_scope();
    scope.instance_typed::<PublisherOptions>().unwrap();
    scope.instance_typed::<PublisherOptions>().unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 1);

    provider
        .create_scope()
        .instance_typed::<PublisherOptions>()
        .unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 2);
}

#[test]
fn should_resolve_last_registered_options() {
    let mut services = ServiceCollection::new();
    services
        .register_fixed_options(
            PublisherOptions {
                endpoint: "fixed".to_string(),
            },
            Publisher::new,
        )
        .register_options_factory(|_| {
            Ok(PublisherOptions {
                endpoint: "from-factory".to_string(),
            })
        });

    let provider = services.build();
    let options = provider
        .create_scope()
        .instance_typed::<PublisherOptions>()
        .unwrap();

    assert_eq!(options.endpoint, "from-factory");
}

#[test]
fn should_resolve_fixed_options_when_registered_last() {
    let mut services = ServiceCollection::new();
    services
        .register_options_factory(|_| {
            Ok(PublisherOptions {
                endpoint: "from-factory".to_string(),
            })
        })
        .register_fixed_options(
            PublisherOptions {
                endpoint: "fixed".to_string(),
            },
            Publisher::new,
        );

    let provider = services.build();
    let mut scope = provider.create_scope();

    let options = scope.instance_typed::<PublisherOptions>().unwrap();
    assert_eq!(options.endpoint, "fixed");

    let publisher = scope.instance_typed::<Publisher>().unwrap();
    assert!(ServiceInstancePtr::ptr_eq(&publisher.options, &options));
}

#[test]
fn should_share_options_instance_with_dependent_service() {
    let mut services = ServiceCollection::new();
    services
        .register_options_factory(|_| {
            Ok(PublisherOptions {
                endpoint: "shared".to_string(),
            })
        })
        .add_scoped_factory(|provider| {
            provider
                .instance_typed::<PublisherOptions>()
                .map(Publisher::new)
        });

    let provider = services.build();
    let mut scope = provider.create_scope();

    let publisher = scope.instance_typed::<Publisher>().unwrap();
    let options = scope.instance_typed::<PublisherOptions>().unwrap();

    assert!(ServiceInstancePtr::ptr_eq(&publisher.options, &options));
}
