#![allow(clippy::must_use_candidate)]

//! Configuration for the easel generation cascade
//!
//! Loaded from a TOML file with `{{ env.VAR }}` expansion. Each scope
//! (text/image) carries its own deadline, retry, and preference tuning;
//! provider endpoints can be overridden individually, which is also how the
//! test harness points adapters at mock servers.

mod env;
mod loader;

use std::time::Duration;

use easel_core::Preference;
use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

/// Top-level easel configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cascade tuning for text generation
    #[serde(default = "ScopeConfig::text_default")]
    pub text: ScopeConfig,
    /// Cascade tuning for image generation
    #[serde(default = "ScopeConfig::image_default")]
    pub image: ScopeConfig,
    /// Per-provider endpoint overrides, keyed by provider id
    #[serde(default)]
    pub providers: IndexMap<String, ProviderOverride>,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text: ScopeConfig::text_default(),
            image: ScopeConfig::image_default(),
            providers: IndexMap::new(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Cascade tuning for one scope
///
/// The two scopes default to different constants: image providers are
/// slower to answer than text providers, so the image scope ships with a
/// longer deadline and a longer inter-retry delay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScopeConfig {
    /// Provider preference: `auto`, `none`, or a provider id
    pub preference: Preference,
    /// Per-attempt deadline in milliseconds
    pub timeout_ms: u64,
    /// Retries against the same provider after its first failed attempt
    pub max_retries_per_provider: u32,
    /// Delay before the first retry, in milliseconds
    pub retry_delay_ms: u64,
    /// Linear increment added to the delay for each further retry
    pub retry_delay_step_ms: u64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self::text_default()
    }
}

impl ScopeConfig {
    /// Default tuning for the text scope
    pub fn text_default() -> Self {
        Self {
            preference: Preference::Auto,
            timeout_ms: 25_000,
            max_retries_per_provider: 1,
            retry_delay_ms: 500,
            retry_delay_step_ms: 500,
        }
    }

    /// Default tuning for the image scope
    pub fn image_default() -> Self {
        Self {
            preference: Preference::Auto,
            timeout_ms: 30_000,
            max_retries_per_provider: 1,
            retry_delay_ms: 750,
            retry_delay_step_ms: 750,
        }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub const fn retry_delay_step(&self) -> Duration {
        Duration::from_millis(self.retry_delay_step_ms)
    }
}

/// Endpoint override for a single provider
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderOverride {
    /// Base URL replacing the provider's default endpoint
    pub base_url: Option<Url>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TelemetryConfig {
    /// `tracing-subscriber` env-filter directive
    pub filter: String,
    /// Emit JSON-formatted log lines instead of human-readable ones
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

impl Config {
    /// Cascade tuning for the given scope
    pub const fn scope(&self, scope: easel_core::Scope) -> &ScopeConfig {
        match scope {
            easel_core::Scope::Text => &self.text,
            easel_core::Scope::Image => &self.image,
        }
    }

    /// Base URL override for a provider id, if configured
    pub fn base_url_override(&self, provider: &str) -> Option<&Url> {
        self.providers.get(provider).and_then(|p| p.base_url.as_ref())
    }
}
