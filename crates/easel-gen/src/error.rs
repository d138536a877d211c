use easel_core::AttemptOutcome;
use thiserror::Error;

/// Errors produced by a single provider attempt
///
/// None of these ever reach the cascade's caller: every variant is
/// recorded in an [`easel_core::AttemptRecord`] and drives the
/// retry/failover machinery instead.
#[derive(Debug, Error)]
pub enum GenError {
    /// The per-attempt deadline elapsed before the provider answered
    #[error("attempt timed out")]
    Timeout,

    /// The call failed below the HTTP layer (connect, DNS, read)
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-2xx status or an unusable payload
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// An adapter requiring a credential was invoked without one
    ///
    /// The resolver filters credential-less providers out before any
    /// attempt, so hitting this indicates a wiring mistake, not a
    /// runtime condition.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// The caller cancelled the cascade while this attempt was in flight
    #[error("generation cancelled")]
    Cancelled,
}

impl GenError {
    /// Whether the failure is transient and worth a retry or failover
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_) | Self::InvalidResponse(_))
    }

    /// The attempt-record outcome this failure is logged as
    ///
    /// A cancelled attempt is recorded as a transport error: the
    /// connection was torn down before a response arrived.
    pub(crate) const fn record_outcome(&self) -> AttemptOutcome {
        match self {
            Self::Timeout => AttemptOutcome::Timeout,
            Self::Transport(_) | Self::Cancelled => AttemptOutcome::TransportError,
            Self::InvalidResponse(_) | Self::MissingCredential(_) => AttemptOutcome::InvalidResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(GenError::Timeout.is_transient());
        assert!(GenError::Transport("refused".to_owned()).is_transient());
        assert!(GenError::InvalidResponse("empty".to_owned()).is_transient());
        assert!(!GenError::MissingCredential("KEY").is_transient());
        assert!(!GenError::Cancelled.is_transient());
    }

    #[test]
    fn outcome_mapping() {
        assert_eq!(GenError::Timeout.record_outcome(), AttemptOutcome::Timeout);
        assert_eq!(
            GenError::Transport("x".to_owned()).record_outcome(),
            AttemptOutcome::TransportError
        );
        assert_eq!(
            GenError::InvalidResponse("x".to_owned()).record_outcome(),
            AttemptOutcome::InvalidResponse
        );
    }
}
