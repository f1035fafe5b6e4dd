//! Remote classification adapter.
//!
//! Sends a fixed instruction template plus the patient text to an LLM
//! provider, then treats the reply as untrusted input: strip code fences,
//! parse JSON, validate every required field, and only then build a
//! [`TriageResult`]. A reply with any invalid field is rejected whole.
//!
//! One request per call. Recovery is the orchestrator's job.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::llm::{LlmProvider, ProviderError};

use super::bundle::{BundleSet, StringBundle};
use super::language::Language;
use super::types::{Tier, TriageResult};

/// Confidence used when a valid reply omits `confidence`.
pub const DEFAULT_REMOTE_CONFIDENCE: u8 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteClassificationError {
    #[error("remote classifier unreachable: {0}")]
    Unreachable(String),
    #[error("remote classifier rejected the credential: {0}")]
    InvalidCredential(String),
    #[error("malformed remote reply: {0}")]
    MalformedResponse(String),
    #[error("remote reply violates schema: {0}")]
    SchemaViolation(String),
}

impl RemoteClassificationError {
    /// Short kind name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteClassificationError::Unreachable(_) => "unreachable",
            RemoteClassificationError::InvalidCredential(_) => "invalid_credential",
            RemoteClassificationError::MalformedResponse(_) => "malformed_response",
            RemoteClassificationError::SchemaViolation(_) => "schema_violation",
        }
    }
}

impl From<ProviderError> for RemoteClassificationError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unauthorized(m) => RemoteClassificationError::InvalidCredential(m),
            ProviderError::Body(m) => RemoteClassificationError::MalformedResponse(m),
            ProviderError::EmptyReply => {
                RemoteClassificationError::MalformedResponse(ProviderError::EmptyReply.to_string())
            }
            other @ (ProviderError::Transport(_)
            | ProviderError::Status { .. }
            | ProviderError::Client(_)
            | ProviderError::UnknownProvider(_)) => {
                RemoteClassificationError::Unreachable(other.to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    provider: LlmProvider,
    bundles: Arc<BundleSet>,
}

impl RemoteClassifier {
    /// `provider` already carries the credential it authenticates with.
    pub fn new(provider: LlmProvider, bundles: Arc<BundleSet>) -> Self {
        Self { provider, bundles }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn classify(
        &self,
        text: &str,
        language: Language,
    ) -> Result<TriageResult, RemoteClassificationError> {
        let prompt = build_prompt(text, language);
        debug!(provider = self.provider.name(), %language, text_len = text.len(), "remote classification");

        let reply = self.provider.complete(&prompt).await?;
        trace!(reply = %reply, "remote classification reply");

        parse_reply(&reply, self.bundles.get(language))
    }
}

/// The instruction template followed by the quoted patient text.
pub fn build_prompt(text: &str, language: Language) -> String {
    let lang = language.display_name();
    format!(
        r#"You are an AI Medical Triage Assistant for Rural India.
Analyze the patient's symptoms and classify them into one of 4 Tiers:

Tier 1 (Red): Critical/Life-Threatening (Heart attack, stroke, severe trauma, difficulty breathing). Action: Ambulance.
Tier 2 (Orange): Severe/Urgent (High fever >103F, broken bones, severe abdominal pain). Action: Hospital/PHC Visit.
Tier 3 (Yellow): Moderate (Flu, mild fever, rash, chronic pain). Action: Tele-doctor.
Tier 4 (Green): Mild (Cold, cough, general inquiry, nutrition). Action: Health Worker/Home Care.

Output ONLY valid JSON in this format:
{{
  "tier": number,
  "assessment": "Short title in {lang}",
  "recommendations": ["rec1", "rec2", "rec3"] (in {lang}),
  "confidence": number (0-100)
}}

Patient Symptoms: "{text}""#
    )
}

/// Remove a surrounding Markdown code fence (with or without a `json` tag).
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => rest.get(idx + 1..).unwrap_or(""),
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Validate a raw reply and build the result with `bundle`'s action labels.
pub fn parse_reply(
    reply: &str,
    bundle: &StringBundle,
) -> Result<TriageResult, RemoteClassificationError> {
    let json = strip_code_fence(reply);
    let value: Value = serde_json::from_str(json)
        .map_err(|e| RemoteClassificationError::MalformedResponse(format!("not JSON: {e}")))?;

    let obj = value.as_object().ok_or_else(|| {
        RemoteClassificationError::MalformedResponse("reply is not a JSON object".into())
    })?;

    let tier = obj
        .get("tier")
        .and_then(integral)
        .and_then(Tier::from_level)
        .ok_or_else(|| schema("`tier` must be an integer in 1..=4"))?;

    let assessment = obj
        .get("assessment")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| schema("`assessment` must be a non-empty string"))?
        .to_string();

    let recommendations = obj
        .get("recommendations")
        .and_then(Value::as_array)
        .ok_or_else(|| schema("`recommendations` must be an array"))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| schema("`recommendations` entries must be non-empty strings"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if recommendations.is_empty() {
        return Err(schema("`recommendations` must not be empty"));
    }

    let confidence = match obj.get("confidence") {
        None | Some(Value::Null) => DEFAULT_REMOTE_CONFIDENCE,
        Some(v) => v
            .as_f64()
            .map(clamp_confidence)
            .ok_or_else(|| schema("`confidence` must be a number"))?,
    };

    Ok(TriageResult::new(tier, assessment, recommendations, confidence, bundle))
}

fn schema(msg: &str) -> RemoteClassificationError {
    RemoteClassificationError::SchemaViolation(msg.to_string())
}

/// Integer value of a JSON number, accepting integral floats such as `2.0`.
fn integral(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f.abs() < 1e9 {
        Some(f as i64)
    } else {
        None
    }
}

fn clamp_confidence(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
