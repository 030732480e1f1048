use wirebox_di::instance_provider::{ServiceInstancePtr, TypedServiceInstanceProvider};
use wirebox_di::service_registry::ServiceCollection;

struct Greeter {
    greeting: String,
}

struct GreetingService {
    greeter: ServiceInstancePtr<Greeter>,
}

impl GreetingService {
    fn greet(&self, name: &str) -> String {
        format!("{}, {}!", self.greeter.greeting, name)
    }
}

fn main() {
    // all registration happens up front, on one thread; the collection keeps
    // descriptors in registration order
    let mut services = ServiceCollection::new();
    services
        // singletons can be registered as pre-built values...
        .add_singleton_value(Greeter {
            greeting: "Hello".to_string(),
        })
        // ...while scoped services are built by a factory receiving the
        // active resolver, once per scope
        .add_scoped_factory(|provider| {
            provider
                .instance_typed::<Greeter>()
                .map(|greeter| GreetingService { greeter })
        });

    // building freezes the registry - resolution only from here on
    let provider = services.build();
    let mut scope = provider.create_scope();

    let service = scope
        .instance_typed::<GreetingService>()
        .expect("error creating GreetingService");

    // prints "Hello, world!"
    println!("{}", service.greet("world"));

    // resolving again in the same scope reuses the instance
    let same_service = scope
        .instance_typed::<GreetingService>()
        .expect("error creating GreetingService");
    println!(
        "same instance in scope: {}",
        ServiceInstancePtr::ptr_eq(&service, &same_service)
    );
}
