//! Google Gemini `generateContent` provider.
//!
//! One prompt in, one text part out. Gemini wire types are private to this
//! module. The key travels as the `key` query parameter, as the public
//! Generative Language API expects.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::config::ApiKey;
use crate::llm::ProviderError;

use super::{check_status, classify_status};

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: ApiKey,
}

impl GeminiProvider {
    /// `api_base_url` is the API root (e.g. `https://generativelanguage.googleapis.com/v1beta`);
    /// the model path and `:generateContent` are appended here.
    pub fn new(
        api_base_url: String,
        model: String,
        temperature: f32,
        timeout_seconds: u64,
        api_key: ApiKey,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        let endpoint = endpoint_url(&api_base_url, &model);
        Ok(Self { client, endpoint, model, temperature, api_key })
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
            generation_config: GenerationConfig { temperature: self.temperature },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending Gemini request");
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full Gemini request payload");
        }

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL; strip it so the key never reaches the logs.
                let e = e.without_url();
                error!(endpoint = %self.endpoint, error = %e, "Gemini HTTP request failed (transport)");
                ProviderError::Transport(e.to_string())
            })?;

        let response = check_status(response).await?;

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "failed to read Gemini response body");
            ProviderError::Body(e.to_string())
        })?;
        trace!(response = %body, "full Gemini response payload");

        extract_text(&body)
    }
}

/// Build `<base>/models/<model>:generateContent`, tolerating a trailing slash.
fn endpoint_url(api_base_url: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", api_base_url.trim_end_matches('/'))
}

/// Pull `candidates[0].content.parts[0].text` out of a success body.
///
/// An `error` object inside a 2xx body is still a failure.
fn extract_text(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Body(format!("failed to parse response body: {e}")))?;

    if let Some(err) = parsed.error {
        let status = err.code.and_then(|c| u16::try_from(c).ok()).unwrap_or(200);
        return Err(classify_status(status, err.message));
    }

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ProviderError::EmptyReply)
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<InlineError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InlineError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}
