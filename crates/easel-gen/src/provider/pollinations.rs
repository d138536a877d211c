//! Free anonymous provider: plain-text and image endpoints, no credential
//!
//! The two scopes live on different hosts upstream; a single base URL
//! override collapses both onto one host for testing.

use async_trait::async_trait;
use easel_core::{GenerationRequest, Scope};
use reqwest::Client;
use secrecy::SecretString;
use url::Url;

use super::{Provider, RawPayload};
use crate::error::GenError;

const DEFAULT_TEXT_BASE_URL: &str = "https://text.pollinations.ai";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";

/// Anonymous free-tier adapter serving both scopes
pub struct PollinationsProvider {
    client: Client,
    text_base: Url,
    image_base: Url,
}

impl PollinationsProvider {
    pub fn new(base_url: Option<&Url>) -> Self {
        let text_base = base_url
            .cloned()
            .unwrap_or_else(|| Url::parse(DEFAULT_TEXT_BASE_URL).expect("valid default URL"));
        let image_base = base_url
            .cloned()
            .unwrap_or_else(|| Url::parse(DEFAULT_IMAGE_BASE_URL).expect("valid default URL"));

        Self {
            client: Client::new(),
            text_base,
            image_base,
        }
    }

    fn text_url(&self, prompt: &str) -> Result<Url, GenError> {
        let mut url = self.text_base.clone();
        url.path_segments_mut()
            .map_err(|()| GenError::Transport("provider base URL is not a valid HTTP base".to_owned()))?
            .pop_if_empty()
            .push(prompt);
        Ok(url)
    }

    fn image_url(&self, request: &GenerationRequest) -> Result<Url, GenError> {
        let mut url = self.image_base.clone();
        url.path_segments_mut()
            .map_err(|()| GenError::Transport("provider base URL is not a valid HTTP base".to_owned()))?
            .pop_if_empty()
            .push("prompt")
            .push(&request.prompt);
        url.query_pairs_mut()
            .append_pair("width", &request.size.width.to_string())
            .append_pair("height", &request.size.height.to_string());
        Ok(url)
    }
}

#[async_trait]
impl Provider for PollinationsProvider {
    fn id(&self) -> &'static str {
        "pollinations"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        _credential: Option<&SecretString>,
    ) -> Result<RawPayload, GenError> {
        let url = match request.scope {
            Scope::Text => self.text_url(&request.prompt)?,
            Scope::Image => self.image_url(request)?,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GenError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(provider = "pollinations", status = %status, "provider returned error status");
            return Err(GenError::InvalidResponse(format!("provider returned {status}")));
        }

        match request.scope {
            Scope::Text => {
                let text = response
                    .text()
                    .await
                    .map_err(|e| GenError::InvalidResponse(format!("unreadable response body: {e}")))?;
                Ok(RawPayload::Text(text))
            }
            Scope::Image => {
                let media_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("image/jpeg")
                    .to_owned();
                let data = response
                    .bytes()
                    .await
                    .map_err(|e| GenError::InvalidResponse(format!("unreadable response body: {e}")))?;
                Ok(RawPayload::Bytes {
                    data: data.to_vec(),
                    media_type,
                })
            }
        }
    }
}
