use std::fmt;
use std::time::Duration;

/// Generated payload in canonical form
///
/// The rendering layer treats both variants uniformly; only the transport
/// differs (inline string vs raw bytes plus a media type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Bytes { data: Vec<u8>, media_type: String },
}

impl Content {
    /// Whether the payload carries no usable content
    ///
    /// Empty content is never a valid generation result; attempts producing
    /// it are counted as failures.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Bytes { data, .. } => data.is_empty(),
        }
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Bytes { data, .. } => data.len(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes { .. } => None,
        }
    }
}

/// Terminal state of a single provider attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    /// The per-attempt deadline elapsed before the provider answered
    Timeout,
    /// The call never produced an HTTP response (connect/read failure)
    TransportError,
    /// The provider answered, but with an unusable payload or status
    InvalidResponse,
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Timeout => f.write_str("timeout"),
            Self::TransportError => f.write_str("transport_error"),
            Self::InvalidResponse => f.write_str("invalid_response"),
        }
    }
}

/// One timed invocation of one provider
///
/// A cascade run appends these in execution order; the caller receives the
/// full trail inside [`GenerationResult`] for diagnostics.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// Provider that was invoked
    pub provider: String,
    /// Zero-based attempt index against this provider
    pub attempt: u32,
    /// Wall-clock duration of the attempt
    pub duration: Duration,
    pub outcome: AttemptOutcome,
    /// Failure detail, absent on success
    pub error: Option<String>,
}

impl AttemptRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Success
    }
}

/// Terminal result of one cascade run
///
/// Always produced: when every remote provider fails, the offline
/// generator supplies the content and `degraded` is set.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub content: Content,
    /// Provider that produced `content`
    pub source_provider: String,
    /// True exactly when the offline generator produced the content
    pub degraded: bool,
    /// Every attempt made during the run, in order
    pub attempts: Vec<AttemptRecord>,
}
