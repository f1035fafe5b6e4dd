//! Public configuration structs consumed by the engine and the binary.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};

use crate::triage::catalog::MatchScope;
use crate::triage::language::Language;

/// Remote classification credential.
///
/// Sourced from `TRIAGE_API_KEY` only. `Debug` never prints the value.
#[derive(Clone)]
pub struct ApiKey(Arc<Secret<String>>);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::new(Secret::new(key.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Gemini provider configuration (`[remote.gemini]`).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root; `/models/<model>:generateContent` is appended.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// OpenAI / OpenAI-compatible provider configuration (`[remote.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

/// Remote classification configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Active provider: `"gemini"`, `"openai"` or `"dummy"`.
    pub provider: String,
    pub gemini: GeminiConfig,
    pub openai: OpenAiConfig,
}

/// Extra triggers appended to the built-in catalog for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraTriggers {
    pub tier1: Vec<String>,
    pub tier2: Vec<String>,
    pub tier3: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Accept a non-secure context when the host is localhost.
    pub allow_localhost: bool,
}

/// Fully-resolved engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Default patient language.
    pub language: Language,
    pub match_scope: MatchScope,
    pub remote: RemoteConfig,
    pub catalog: HashMap<Language, ExtraTriggers>,
    pub voice: VoiceConfig,
    /// `None` means fallback-only mode. Never sourced from TOML.
    pub api_key: Option<ApiKey>,
}

impl Config {
    pub fn remote_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
        assert_eq!(key.expose(), "super-secret");
        assert_eq!(key.clone().expose(), "super-secret");
    }
}
