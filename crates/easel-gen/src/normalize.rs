//! Mapping of provider payloads into the canonical result shape
//!
//! Every remote answer funnels through [`normalize`] regardless of which
//! provider produced it; adapters never hand content to the cascade
//! directly. Normalization is idempotent: canonical content fed back in
//! comes out unchanged.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use easel_core::{Content, Scope};
use serde_json::Value;

use crate::error::GenError;
use crate::provider::RawPayload;

/// Normalize a raw provider payload into canonical [`Content`]
///
/// Recognized JSON shapes: OpenAI chat completions
/// (`choices[0].message.content`), OpenAI image generations
/// (`data[0].b64_json`), platform driver envelopes
/// (`result.message.content` / string `result`), and bare JSON strings.
/// URL-only image payloads are rejected: the cascade requires content
/// bytes, not a pointer to fetch later.
///
/// # Errors
///
/// Returns [`GenError::InvalidResponse`] for unrecognized shapes, broken
/// base64, and any payload whose content is empty.
pub fn normalize(raw: RawPayload, scope: Scope) -> Result<Content, GenError> {
    let content = match raw {
        RawPayload::Text(text) => Content::Text(text),
        RawPayload::Bytes { data, media_type } => Content::Bytes { data, media_type },
        RawPayload::Json(value) => json_content(&value, scope)?,
    };

    if content.is_empty() {
        return Err(GenError::InvalidResponse("payload carries no content".to_owned()));
    }

    Ok(content)
}

fn json_content(value: &Value, scope: Scope) -> Result<Content, GenError> {
    // OpenAI-compatible chat completion
    if let Some(text) = value.pointer("/choices/0/message/content").and_then(Value::as_str) {
        return Ok(Content::Text(text.to_owned()));
    }

    // OpenAI-compatible image generation with inline payload
    if let Some(encoded) = value.pointer("/data/0/b64_json").and_then(Value::as_str) {
        let data = BASE64
            .decode(encoded)
            .map_err(|e| GenError::InvalidResponse(format!("broken base64 image payload: {e}")))?;
        return Ok(Content::Bytes {
            data,
            media_type: default_media_type(scope).to_owned(),
        });
    }

    if value.pointer("/data/0/url").is_some() {
        return Err(GenError::InvalidResponse(
            "url-only payload without content bytes".to_owned(),
        ));
    }

    // Platform driver envelope
    if let Some(text) = value.pointer("/result/message/content").and_then(Value::as_str) {
        return Ok(Content::Text(text.to_owned()));
    }
    if let Some(text) = value.get("result").and_then(Value::as_str) {
        return Ok(Content::Text(text.to_owned()));
    }

    if let Some(text) = value.as_str() {
        return Ok(Content::Text(text.to_owned()));
    }

    Err(GenError::InvalidResponse("unrecognized payload shape".to_owned()))
}

const fn default_media_type(scope: Scope) -> &'static str {
    match scope {
        Scope::Text => "text/plain",
        Scope::Image => "image/png",
    }
}
