use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default per-attempt deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

/// Default number of retries against a single provider (on top of the
/// first attempt)
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Default artifact dimensions for image requests
pub const DEFAULT_SIZE: SizeParams = SizeParams {
    width: 1024,
    height: 1024,
};

/// What kind of content a request produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Prose output
    Text,
    /// Binary image output
    Image,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Requested artifact dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeParams {
    pub width: u32,
    pub height: u32,
}

impl Default for SizeParams {
    fn default() -> Self {
        DEFAULT_SIZE
    }
}

impl SizeParams {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SizeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Opaque style hints forwarded to providers that understand them
///
/// Keys are provider-conventional ("temperature", "style", ...); unknown
/// keys are ignored by adapters that have no use for them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleParams(serde_json::Map<String, Value>);

impl StyleParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a style hint by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a style hint, replacing any previous value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One user-initiated generation request
///
/// Constructed per user action and request-scoped: nothing here is
/// persisted, and the deadline/retry knobs travel with the request so two
/// concurrent requests can be tuned independently.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub scope: Scope,
    pub prompt: String,
    pub style: StyleParams,
    pub size: SizeParams,
    /// Per-attempt deadline; an attempt exceeding it is cancelled and
    /// recorded as a timeout
    pub timeout: Duration,
    /// Retries against the same provider after its first failed attempt
    pub max_retries_per_provider: u32,
}

impl GenerationRequest {
    /// A text request with default deadline and retry settings
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::new(Scope::Text, prompt)
    }

    /// An image request with default deadline, retry, and size settings
    pub fn image(prompt: impl Into<String>) -> Self {
        Self::new(Scope::Image, prompt)
    }

    fn new(scope: Scope, prompt: impl Into<String>) -> Self {
        Self {
            scope,
            prompt: prompt.into(),
            style: StyleParams::default(),
            size: SizeParams::default(),
            timeout: DEFAULT_TIMEOUT,
            max_retries_per_provider: DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries_per_provider = retries;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: SizeParams) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleParams) -> Self {
        self.style = style;
        self
    }
}
