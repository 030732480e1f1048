// note: this example assumes you've analyzed the previous one

use wirebox_di::instance_provider::{ServiceInstancePtr, TypedServiceInstanceProvider};
use wirebox_di::options::OptionsRegistrationExt;
use wirebox_di::service_registry::ServiceCollection;

struct FeedOptions {
    url: String,
}

struct FeedReader {
    options: ServiceInstancePtr<FeedOptions>,
}

impl FeedReader {
    fn new(options: ServiceInstancePtr<FeedOptions>) -> Self {
        Self { options }
    }
}

// some other registered service the options may need, e.g. a secrets store
struct SecretsVault;

impl SecretsVault {
    fn secret(&self, name: &str) -> String {
        format!("https://vault.example/{}", name)
    }
}

fn main() {
    let mut services = ServiceCollection::new();

    // strategy 1: build the options up front and register them as a fixed
    // singleton together with the dependent service; note the options cannot
    // resolve any other service this way - they must be fully formed here
    services.register_fixed_options(
        FeedOptions {
            url: "https://example.com/feed".to_string(),
        },
        FeedReader::new,
    );

    // strategy 2: defer options construction to a factory receiving the
    // resolver, which can look up other registered services properly
    services
        .add_singleton_value(SecretsVault)
        .register_options_factory(|provider| {
            let vault = provider.instance_typed::<SecretsVault>()?;
            Ok(FeedOptions {
                url: vault.secret("feed-url"),
            })
        })
        // the dependent service is registered separately for this strategy,
        // resolving the options from the provider
        .add_scoped_factory(|provider| {
            provider.instance_typed::<FeedOptions>().map(FeedReader::new)
        });

    let provider = services.build();
    let reader = provider
        .create_scope()
        .instance_typed::<FeedReader>()
        .expect("error creating FeedReader");

    // the factory registration came last, so it wins:
    // prints "https://vault.example/feed-url"
    println!("{}", reader.options.url);
}
