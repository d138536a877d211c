//! Programmatic configuration builder for integration tests

use easel_config::{Config, ProviderOverride, ScopeConfig};
use easel_core::Preference;
use url::Url;

/// Builder for cascade configurations pointing at mock providers
///
/// Tests use fast timeouts and zero retry delays so failure paths run in
/// milliseconds instead of wall-clock seconds.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let fast = ScopeConfig {
            preference: Preference::Auto,
            timeout_ms: 2_000,
            max_retries_per_provider: 0,
            retry_delay_ms: 0,
            retry_delay_step_ms: 0,
        };

        let mut config = Config::default();
        config.text = fast.clone();
        config.image = fast;
        Self { config }
    }

    /// Point a provider id at a mock server
    pub fn with_provider(mut self, id: &str, base_url: &Url) -> Self {
        self.config.providers.insert(
            id.to_owned(),
            ProviderOverride {
                base_url: Some(base_url.clone()),
            },
        );
        self
    }

    /// Point a provider id at an address nothing listens on
    pub fn with_dead_provider(mut self, id: &str) -> Self {
        let url = dead_url();
        self.config
            .providers
            .insert(id.to_owned(), ProviderOverride { base_url: Some(url) });
        self
    }

    pub fn with_text_preference(mut self, preference: Preference) -> Self {
        self.config.text.preference = preference;
        self
    }

    pub fn with_image_preference(mut self, preference: Preference) -> Self {
        self.config.image.preference = preference;
        self
    }

    pub fn with_text_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.text.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.config.text.max_retries_per_provider = retries;
        self.config.image.max_retries_per_provider = retries;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// An address that refuses connections: bind an ephemeral port, then
/// release it before anyone connects
fn dead_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("can bind ephemeral port");
    let addr = listener.local_addr().expect("bound socket has an address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("socket address is a valid URL")
}
