//! Dummy LLM provider: scripted replies, no network.
//!
//! Default behaviour echoes the prompt back prefixed with `[echo]`, which the
//! triage adapter rejects as malformed. That exercises the fallback path
//! end-to-end without an endpoint. Tests script a reply or an error instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
enum Script {
    Echo,
    Reply(String),
    Fail(ProviderError),
}

#[derive(Debug, Clone)]
pub struct DummyProvider {
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl DummyProvider {
    pub fn echo() -> Self {
        Self { script: Script::Echo, calls: Arc::new(AtomicUsize::new(0)) }
    }

    /// Always answer with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self { script: Script::Reply(reply.into()), calls: Arc::new(AtomicUsize::new(0)) }
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self { script: Script::Fail(error), calls: Arc::new(AtomicUsize::new(0)) }
    }

    /// Number of `complete` calls so far, shared across clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn complete(&self, content: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Echo => Ok(format!("[echo] {content}")),
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Fail(e) => Err(e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_prefixes_input() {
        let p = DummyProvider::echo();
        assert_eq!(p.complete("hello").await.unwrap(), "[echo] hello");
    }

    #[tokio::test]
    async fn scripted_reply_and_call_count() {
        let p = DummyProvider::replying("{}");
        let clone = p.clone();
        assert_eq!(clone.complete("a").await.unwrap(), "{}");
        assert_eq!(p.complete("b").await.unwrap(), "{}");
        assert_eq!(p.calls(), 2);
    }

    #[tokio::test]
    async fn scripted_failure() {
        let p = DummyProvider::failing(ProviderError::Transport("refused".into()));
        let err = p.complete("x").await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
