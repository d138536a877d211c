//! Groq text provider (OpenAI-compatible chat completions)

use async_trait::async_trait;
use easel_core::GenerationRequest;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use url::Url;

use super::{Provider, RawPayload, base_or_default, read_json_response};
use crate::error::GenError;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq chat completions adapter
pub struct GroqProvider {
    client: Client,
    base_url: String,
}

impl GroqProvider {
    pub fn new(base_url: Option<&Url>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_or_default(base_url, DEFAULT_BASE_URL),
        }
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn id(&self) -> &'static str {
        "groq"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        credential: Option<&SecretString>,
    ) -> Result<RawPayload, GenError> {
        let key = credential.ok_or(GenError::MissingCredential("GROQ_API_KEY"))?;

        let mut body = json!({
            "model": DEFAULT_MODEL,
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
            .map_err(|e| {
                tracing::debug!(provider = "groq", error = %e, "request failed");
                GenError::Transport(e.to_string())
            })?;

        read_json_response(response, "groq").await
    }
}
