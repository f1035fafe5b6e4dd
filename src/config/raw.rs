//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults, so an
//! empty file is a valid config. The `load` module converts them into the
//! public `types` structs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::triage::catalog::MatchScope;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape, the serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub triage: RawTriage,
    #[serde(default)]
    pub remote: RawRemote,
    /// `[catalog.<lang>]` tables, keyed by language code.
    #[serde(default)]
    pub catalog: HashMap<String, RawExtraTriggers>,
    #[serde(default)]
    pub voice: RawVoice,
}

#[derive(Deserialize)]
pub(super) struct RawTriage {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub match_scope: MatchScope,
}

impl Default for RawTriage {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            language: default_language(),
            match_scope: MatchScope::default(),
        }
    }
}

// ── Remote ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawRemote {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub gemini: RawGemini,
    #[serde(default)]
    pub openai: RawOpenAi,
}

impl Default for RawRemote {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            gemini: RawGemini::default(),
            openai: RawOpenAi::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawGemini {
    #[serde(default = "default_gemini_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawGemini {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawOpenAi {
    #[serde(default = "default_openai_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RawOpenAi {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ── Catalog / voice ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub(super) struct RawExtraTriggers {
    #[serde(default)]
    pub tier1: Vec<String>,
    #[serde(default)]
    pub tier2: Vec<String>,
    #[serde(default)]
    pub tier3: Vec<String>,
}

#[derive(Deserialize)]
pub(super) struct RawVoice {
    #[serde(default = "default_true")]
    pub allow_localhost: bool,
}

impl Default for RawVoice {
    fn default() -> Self {
        Self { allow_localhost: true }
    }
}

// ── Defaults ────────────────────────────────────────────────────────────────

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_language() -> String {
    "en".to_string()
}

pub(super) fn default_provider() -> String {
    "gemini".to_string()
}

pub(super) fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

pub(super) fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

pub(super) fn default_openai_api_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

pub(super) fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

pub(super) fn default_temperature() -> f32 {
    0.2
}

pub(super) fn default_timeout_seconds() -> u64 {
    30
}
