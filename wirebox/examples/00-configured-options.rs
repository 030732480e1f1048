use wirebox::application::Application;
use wirebox::config::ConfigurationSource;
use wirebox_di::instance_provider::{ServiceInstancePtr, TypedServiceInstanceProvider};
use wirebox_di::options::OptionsRegistrationExt;

struct ApiClientOptions {
    base_url: String,
}

struct ApiClient {
    options: ServiceInstancePtr<ApiClientOptions>,
}

impl ApiClient {
    fn new(options: ServiceInstancePtr<ApiClientOptions>) -> Self {
        Self { options }
    }
}

// an external collaborator the deferred options can resolve, e.g. a secrets
// manager
struct SecretsManager;

impl SecretsManager {
    fn secret(&self, name: &str) -> String {
        format!("https://secrets.example/{}", name)
    }
}

fn main() {
    // the hosting program builds its configuration sources first
    let configuration = ConfigurationSource::builder()
        .with_override("api_client.base_url", "https://api.example.com")
        .expect("error overriding configuration")
        .build()
        .expect("error building configuration");

    let provider = Application::new(configuration)
        .configure_services(|configuration, services| {
            // strategy 1: options built eagerly from configuration - there's
            // not a whole lot of choice here other than the config, since no
            // resolver is available yet
            services.register_fixed_options(
                ApiClientOptions {
                    base_url: configuration
                        .section("api_client")
                        .get("base_url")
                        .unwrap_or_default(),
                },
                ApiClient::new,
            );

            // strategy 2: options built by a factory receiving the resolver,
            // so another service like a secrets manager can be resolved
            // properly
            services
                .add_singleton_value(SecretsManager)
                .register_options_factory(|provider| {
                    let secrets = provider.instance_typed::<SecretsManager>()?;
                    Ok(ApiClientOptions {
                        base_url: secrets.secret("api-base-url"),
                    })
                })
                // the dependent service for this strategy is registered
                // inline, after the options
                .add_scoped_factory(|provider| {
                    provider
                        .instance_typed::<ApiClientOptions>()
                        .map(ApiClient::new)
                });
        })
        .start();

    let client = provider
        .create_scope()
        .instance_typed::<ApiClient>()
        .expect("error creating ApiClient");

    // the factory registration came last and wins:
    // prints "https://secrets.example/api-base-url"
    println!("{}", client.options.base_url);
}
