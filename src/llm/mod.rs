//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Providers are shared immutable capabilities; clone them freely. Each
//! `complete` call is exactly one round trip. Retrying is the caller's call.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("credential rejected: {0}")]
    Unauthorized(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unreadable response body: {0}")]
    Body(String),
    #[error("empty or missing content in response")]
    EmptyReply,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch keeps callers free of `dyn` trait objects and `async-trait`.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    #[cfg(feature = "remote")]
    Gemini(providers::gemini::GeminiProvider),
    #[cfg(feature = "remote")]
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
}

impl LlmProvider {
    /// Send `prompt` as a single user turn and return the reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(prompt).await,
            #[cfg(feature = "remote")]
            LlmProvider::Gemini(p) => p.complete(prompt).await,
            #[cfg(feature = "remote")]
            LlmProvider::OpenAiCompatible(p) => p.complete(prompt).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            #[cfg(feature = "remote")]
            LlmProvider::Gemini(_) => "gemini",
            #[cfg(feature = "remote")]
            LlmProvider::OpenAiCompatible(_) => "openai",
        }
    }
}
