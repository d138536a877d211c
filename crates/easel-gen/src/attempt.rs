//! Single-try attempt execution: one provider call raced against its
//! deadline and the caller's cancellation token

use easel_core::{Content, GenerationRequest};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;

use crate::error::GenError;
use crate::normalize;
use crate::provider::Provider;

/// Issue exactly one timed, cancellable call to one provider
///
/// The remote call is raced against the request deadline and the
/// cancellation token; losing either race drops the in-flight future,
/// which tears down the underlying connection rather than leaking it.
/// A structurally valid payload is normalized before being reported as
/// success, so an empty or malformed body can never masquerade as one.
///
/// # Errors
///
/// `Timeout` when the deadline wins, `Cancelled` when the token wins,
/// otherwise whatever the provider or normalizer rejected.
pub(crate) async fn execute_attempt(
    provider: &dyn Provider,
    request: &GenerationRequest,
    credential: Option<&SecretString>,
    cancel: &CancellationToken,
) -> Result<Content, GenError> {
    let raw = tokio::select! {
        () = cancel.cancelled() => return Err(GenError::Cancelled),
        raced = tokio::time::timeout(request.timeout, provider.generate(request, credential)) => {
            match raced {
                Err(_elapsed) => return Err(GenError::Timeout),
                Ok(result) => result?,
            }
        }
    };

    normalize::normalize(raw, request.scope)
}
