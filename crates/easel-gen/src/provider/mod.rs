//! Provider trait and adapters for the remote generation backends

pub mod groq;
pub mod openai;
pub mod pollinations;
pub mod puter;

use std::sync::Arc;

use async_trait::async_trait;
use easel_core::{Content, GenerationRequest};
use secrecy::SecretString;
use url::Url;

use crate::error::GenError;
use crate::registry::ProviderDescriptor;

/// Raw provider answer before normalization
///
/// Adapters hand back whatever transport shape the remote uses; the
/// normalizer is the only place that knows how to read these.
#[derive(Debug, Clone)]
pub enum RawPayload {
    Json(serde_json::Value),
    Text(String),
    Bytes { data: Vec<u8>, media_type: String },
}

impl From<Content> for RawPayload {
    fn from(content: Content) -> Self {
        match content {
            Content::Text(text) => Self::Text(text),
            Content::Bytes { data, media_type } => Self::Bytes { data, media_type },
        }
    }
}

/// Uniform interface over one remote generation backend
///
/// One call per `generate` invocation, no internal retries, no timeout.
/// Deadlines and retry discipline belong to the attempt executor and the
/// retry controller that wrap this.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable provider id, matching the registry descriptor
    fn id(&self) -> &'static str;

    /// Issue exactly one generation call
    ///
    /// # Errors
    ///
    /// `Transport` when no HTTP response was obtained, `InvalidResponse`
    /// for non-2xx statuses and unreadable bodies, `MissingCredential`
    /// when a required credential was not supplied.
    async fn generate(
        &self,
        request: &GenerationRequest,
        credential: Option<&SecretString>,
    ) -> Result<RawPayload, GenError>;
}

/// Construct the adapter for a registry descriptor
///
/// Returns `None` for the offline id (not a remote provider) and for ids
/// the build has no adapter for.
pub(crate) fn build_provider(
    descriptor: &ProviderDescriptor,
    base_url: Option<&Url>,
) -> Option<Arc<dyn Provider>> {
    match descriptor.id {
        "groq" => Some(Arc::new(groq::GroqProvider::new(base_url))),
        "openai" => Some(Arc::new(openai::OpenAiProvider::new(base_url))),
        "puter" => Some(Arc::new(puter::PuterProvider::new(base_url))),
        "pollinations" => Some(Arc::new(pollinations::PollinationsProvider::new(base_url))),
        _ => None,
    }
}

/// Read a JSON body out of a response, mapping failure modes uniformly
pub(crate) async fn read_json_response(
    response: reqwest::Response,
    provider: &str,
) -> Result<RawPayload, GenError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(provider, status = %status, "provider returned error status");
        return Err(GenError::InvalidResponse(format!(
            "provider returned {status}: {}",
            truncate(&body, 200)
        )));
    }

    let value: serde_json::Value = response
        .json()
        .await
        .map_err(|e| GenError::InvalidResponse(format!("unparseable response body: {e}")))?;

    Ok(RawPayload::Json(value))
}

/// Normalize a base URL override into a string without trailing slash
pub(crate) fn base_or_default(base_url: Option<&Url>, default: &str) -> String {
    base_url.map_or_else(|| default.to_owned(), |url| url.as_str().trim_end_matches('/').to_owned())
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_or_default_strips_trailing_slash() {
        let url = Url::parse("http://localhost:8080/v1/").unwrap();
        assert_eq!(base_or_default(Some(&url), "https://fallback"), "http://localhost:8080/v1");
        assert_eq!(base_or_default(None, "https://fallback"), "https://fallback");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
