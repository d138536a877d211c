//! OpenAI provider: chat completions for text, image generations for images

use async_trait::async_trait;
use easel_core::{GenerationRequest, Scope};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use url::Url;

use super::{Provider, RawPayload, base_or_default, read_json_response};
use crate::error::GenError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const TEXT_MODEL: &str = "gpt-4o-mini";
const IMAGE_MODEL: &str = "dall-e-3";

/// OpenAI adapter serving both scopes
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(base_url: Option<&Url>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_or_default(base_url, DEFAULT_BASE_URL),
        }
    }

    async fn generate_text(
        &self,
        request: &GenerationRequest,
        key: &SecretString,
    ) -> Result<RawPayload, GenError> {
        let mut body = json!({
            "model": TEXT_MODEL,
            "messages": [{"role": "user", "content": request.prompt}],
        });
        if let Some(temperature) = request.style.get("temperature").and_then(Value::as_f64) {
            body["temperature"] = json!(temperature);
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenError::Transport(e.to_string()))?;

        read_json_response(response, "openai").await
    }

    async fn generate_image(
        &self,
        request: &GenerationRequest,
        key: &SecretString,
    ) -> Result<RawPayload, GenError> {
        // b64_json keeps the artifact inline; url responses would force a
        // second fetch outside the attempt's deadline
        let body = json!({
            "model": IMAGE_MODEL,
            "prompt": request.prompt,
            "n": 1,
            "size": request.size.to_string(),
            "response_format": "b64_json",
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenError::Transport(e.to_string()))?;

        read_json_response(response, "openai").await
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn id(&self) -> &'static str {
        "openai"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        credential: Option<&SecretString>,
    ) -> Result<RawPayload, GenError> {
        let key = credential.ok_or(GenError::MissingCredential("OPENAI_API_KEY"))?;

        match request.scope {
            Scope::Text => self.generate_text(request, key).await,
            Scope::Image => self.generate_image(request, key).await,
        }
    }
}
