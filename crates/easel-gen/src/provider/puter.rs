//! Platform-hosted provider, reached through the driver-call envelope
//!
//! No credential: the platform vouches for the caller at the transport
//! level, which is what puts this adapter in the platform tier.

use async_trait::async_trait;
use easel_core::{GenerationRequest, Scope};
use reqwest::Client;
use secrecy::SecretString;
use serde_json::json;
use url::Url;

use super::{Provider, RawPayload, base_or_default, read_json_response};
use crate::error::GenError;

const DEFAULT_BASE_URL: &str = "https://api.puter.com";

/// Platform driver adapter serving both scopes
pub struct PuterProvider {
    client: Client,
    base_url: String,
}

impl PuterProvider {
    pub fn new(base_url: Option<&Url>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_or_default(base_url, DEFAULT_BASE_URL),
        }
    }
}

#[async_trait]
impl Provider for PuterProvider {
    fn id(&self) -> &'static str {
        "puter"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        _credential: Option<&SecretString>,
    ) -> Result<RawPayload, GenError> {
        let body = match request.scope {
            Scope::Text => json!({
                "interface": "puter-chat-completion",
                "method": "complete",
                "args": {
                    "messages": [{"role": "user", "content": request.prompt}],
                },
            }),
            Scope::Image => json!({
                "interface": "puter-image-generation",
                "method": "generate",
                "args": {
                    "prompt": request.prompt,
                    "width": request.size.width,
                    "height": request.size.height,
                },
            }),
        };

        let response = self
            .client
            .post(format!("{}/drivers/call", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenError::Transport(e.to_string()))?;

        read_json_response(response, "puter").await
    }
}
