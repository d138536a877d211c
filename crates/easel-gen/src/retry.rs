//! Bounded per-provider retry with linear backoff

use std::time::{Duration, Instant};

use easel_core::{AttemptOutcome, AttemptRecord, Content, GenerationRequest};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;

use crate::attempt::execute_attempt;
use crate::error::GenError;
use crate::provider::Provider;

/// Retry discipline for one provider within one cascade run
///
/// Delays are fixed constants from configuration, never computed from
/// response content.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Linear increment added per further retry
    pub delay_step: Duration,
}

impl RetryPolicy {
    /// Total attempts this policy allows
    pub const fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay to wait before the given zero-based retry
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        self.initial_delay + self.delay_step * retry
    }
}

/// What became of one provider after its retry budget
pub(crate) enum RetryOutcome {
    /// An attempt produced usable content
    Success(Content),
    /// Every attempt failed; the provider is done for this cascade run
    Exhausted,
    /// The caller cancelled mid-provider; no further attempts anywhere
    Cancelled,
}

/// Drive one provider through its retry budget
///
/// Appends one [`AttemptRecord`] per attempt to `records` and stops on
/// the first success. A provider that exhausts its budget is never
/// retried again within the same cascade run.
pub(crate) async fn run_provider(
    provider: &dyn Provider,
    request: &GenerationRequest,
    credential: Option<&SecretString>,
    policy: RetryPolicy,
    cancel: &CancellationToken,
    records: &mut Vec<AttemptRecord>,
) -> RetryOutcome {
    for attempt in 0..policy.attempts() {
        if attempt > 0 {
            let delay = policy.delay_before_retry(attempt - 1);
            tokio::select! {
                () = cancel.cancelled() => return RetryOutcome::Cancelled,
                () = tokio::time::sleep(delay) => {}
            }
        }

        let started = Instant::now();
        match execute_attempt(provider, request, credential, cancel).await {
            Ok(content) => {
                records.push(AttemptRecord {
                    provider: provider.id().to_owned(),
                    attempt,
                    duration: started.elapsed(),
                    outcome: AttemptOutcome::Success,
                    error: None,
                });
                return RetryOutcome::Success(content);
            }
            Err(error @ GenError::Cancelled) => {
                records.push(failure_record(provider, attempt, started, &error));
                return RetryOutcome::Cancelled;
            }
            Err(error) => {
                tracing::warn!(
                    provider = provider.id(),
                    attempt,
                    error = %error,
                    "generation attempt failed"
                );
                records.push(failure_record(provider, attempt, started, &error));
            }
        }
    }

    RetryOutcome::Exhausted
}

fn failure_record(provider: &dyn Provider, attempt: u32, started: Instant, error: &GenError) -> AttemptRecord {
    AttemptRecord {
        provider: provider.id().to_owned(),
        attempt,
        duration: started.elapsed(),
        outcome: error.record_outcome(),
        error: Some(error.to_string()),
    }
}
