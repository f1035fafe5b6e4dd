//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory, called once when the triage
//! engine is assembled. Adding a new backend = new module + new match arm.

pub mod dummy;
#[cfg(feature = "remote")]
pub mod gemini;
#[cfg(feature = "remote")]
pub mod openai_compatible;

#[cfg(feature = "remote")]
use serde::Deserialize;

use crate::config::{ApiKey, RemoteConfig};
use crate::llm::{LlmProvider, ProviderError};

/// Construct an `LlmProvider` from config and the deployment credential.
///
/// `api_key` comes from `TRIAGE_API_KEY` (never TOML). Callers only build a
/// provider when a key is present; without one the engine is fallback-only.
#[cfg_attr(not(feature = "remote"), allow(unused_variables))]
pub fn build(config: &RemoteConfig, api_key: ApiKey) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider::echo())),
        #[cfg(feature = "remote")]
        "gemini" => {
            let g = &config.gemini;
            let p = gemini::GeminiProvider::new(
                g.api_base_url.clone(),
                g.model.clone(),
                g.temperature,
                g.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::Gemini(p))
        }
        #[cfg(feature = "remote")]
        "openai" | "openai-compatible" => {
            let oai = &config.openai;
            let p = openai_compatible::OpenAiCompatibleProvider::new(
                oai.api_base_url.clone(),
                oai.model.clone(),
                oai.temperature,
                oai.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

// ── Shared HTTP error handling ────────────────────────────────────────────────

/// Error envelope used by Gemini, OpenAI and compatible APIs.
#[cfg(feature = "remote")]
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[cfg(feature = "remote")]
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    pub message: String,
}

/// Map a non-success status (or an in-body error) to a `ProviderError`.
///
/// 401/403 and messages complaining about the API key are credential
/// failures; everything else is a plain status error.
#[cfg(feature = "remote")]
pub(crate) fn classify_status(status: u16, message: String) -> ProviderError {
    let lower = message.to_ascii_lowercase();
    if status == 401 || status == 403 || lower.contains("api key") || lower.contains("api_key") {
        ProviderError::Unauthorized(message)
    } else {
        ProviderError::Status { status, message }
    }
}

/// Extract a readable message from an error body, preferring the JSON envelope.
#[cfg(feature = "remote")]
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => {
            let code = env
                .error
                .code
                .map(|v| match v {
                    serde_json::Value::String(s) => format!(" [code={s}]"),
                    other => format!(" [code={other}]"),
                })
                .unwrap_or_default();
            format!("{}{code}", env.error.message)
        }
        Err(_) => body.to_string(),
    }
}

/// Consume the response and return it if successful, or a structured error.
#[cfg(feature = "remote")]
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    let message = error_message(&body);

    tracing::error!(%status, %message, "LLM request returned HTTP error");
    Err(classify_status(status.as_u16(), message))
}
