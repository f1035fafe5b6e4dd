//! Triage orchestrator: the one entry point that always returns a result.
//!
//! With a remote classifier configured, the remote attempt runs first and
//! completes before the fallback is consulted. Any remote error is logged
//! and replaced by the fallback result for the same input.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::providers;

use super::bundle::BundleSet;
use super::catalog::KeywordCatalog;
use super::fallback::FallbackClassifier;
use super::language::Language;
use super::remote::RemoteClassifier;
use super::types::{Tier, TriageResult};

#[derive(Debug, Clone)]
pub struct TriageOrchestrator {
    fallback: FallbackClassifier,
    remote: Option<RemoteClassifier>,
}

impl TriageOrchestrator {
    /// `remote: None` is fallback-only mode.
    pub fn new(fallback: FallbackClassifier, remote: Option<RemoteClassifier>) -> Self {
        Self { fallback, remote }
    }

    /// Assemble the engine from resolved config.
    ///
    /// The built-in catalog is extended with `[catalog.<lang>]` triggers. A
    /// remote classifier is only built when a credential is present; a provider
    /// that cannot be built leaves the engine in fallback-only mode.
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = KeywordCatalog::builtin();
        for (language, extra) in &config.catalog {
            catalog.insert(*language, Tier::Critical, &extra.tier1);
            catalog.insert(*language, Tier::Severe, &extra.tier2);
            catalog.insert(*language, Tier::Moderate, &extra.tier3);
        }

        let bundles = Arc::new(BundleSet::builtin());
        let fallback = FallbackClassifier::new(Arc::new(catalog), bundles.clone())
            .with_scope(config.match_scope);

        let remote = match &config.api_key {
            None => {
                info!("no remote credential configured; fallback-only mode");
                None
            }
            Some(key) => match providers::build(&config.remote, key.clone()) {
                Ok(provider) => {
                    info!(provider = provider.name(), "remote classification enabled");
                    Some(RemoteClassifier::new(provider, bundles))
                }
                Err(e) => {
                    warn!(provider = %config.remote.provider, error = %e, "remote provider unavailable; fallback-only mode");
                    None
                }
            },
        };

        Self::new(fallback, remote)
    }

    pub fn is_remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    pub fn fallback(&self) -> &FallbackClassifier {
        &self.fallback
    }

    /// Classify `text` in `language`. Never fails.
    pub async fn classify(&self, text: &str, language: Language) -> TriageResult {
        let Some(remote) = &self.remote else {
            return self.fallback.classify(text, language);
        };

        if text.trim().is_empty() {
            debug!("blank symptom text; skipping remote classification");
            return self.fallback.classify(text, language);
        }

        match remote.classify(text, language).await {
            Ok(result) => {
                debug!(
                    provider = remote.provider_name(),
                    tier = %result.tier(),
                    confidence = result.confidence(),
                    "remote classification succeeded"
                );
                result
            }
            Err(e) => {
                warn!(
                    provider = remote.provider_name(),
                    kind = e.kind(),
                    error = %e,
                    "remote classification failed; using fallback"
                );
                self.fallback.classify(text, language)
            }
        }
    }
}

// ── Superseded calls ──────────────────────────────────────────────────────────

/// Identifies one classification request handed out by [`ResultSlot::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the result of the most recent classification request.
///
/// Each request takes a ticket before it starts. A finished result is only
/// stored if no newer ticket has been issued since, so a slow earlier call
/// never overwrites a newer one. Losing results are dropped.
#[derive(Debug, Default)]
pub struct ResultSlot {
    latest: AtomicU64,
    current: Mutex<Option<TriageResult>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store `result` if `ticket` is still the latest. Returns whether it was kept.
    pub fn offer(&self, ticket: Ticket, result: TriageResult) -> bool {
        let Ok(mut current) = self.current.lock() else {
            return false;
        };
        // Checked under the lock so two offers cannot interleave.
        if ticket.0 != self.latest.load(Ordering::SeqCst) {
            debug!(ticket = ticket.0, "superseded classification result dropped");
            return false;
        }
        *current = Some(result);
        true
    }

    pub fn current(&self) -> Option<TriageResult> {
        self.current.lock().ok().and_then(|c| c.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;
    use crate::llm::providers::dummy::DummyProvider;
    use crate::llm::{LlmProvider, ProviderError};
    use crate::triage::catalog::MatchScope;
    use crate::triage::types::ActionId;

    fn with_provider(provider: DummyProvider) -> TriageOrchestrator {
        let fallback = FallbackClassifier::builtin();
        let remote = RemoteClassifier::new(LlmProvider::Dummy(provider), fallback.bundles().clone());
        TriageOrchestrator::new(fallback, Some(remote))
    }

    #[tokio::test]
    async fn no_credential_uses_fallback() {
        let orch = TriageOrchestrator::from_config(&Config::test_default());
        assert!(!orch.is_remote_enabled());
        let r = orch.classify("severe chest pain, can't breathe", Language::En).await;
        assert_eq!(r.tier(), Tier::Critical);
        assert_eq!(r.confidence(), 90);
        assert_eq!(r.action().label, "Call Ambulance (108)");
    }

    #[tokio::test]
    async fn remote_success_is_returned() {
        let dummy = DummyProvider::replying(
            r#"{"tier":3,"assessment":"Viral fever","recommendations":["Rest","Fluids"],"confidence":66}"#,
        );
        let orch = with_provider(dummy.clone());
        let r = orch.classify("chest pain", Language::En).await;
        assert_eq!(r.tier(), Tier::Moderate);
        assert_eq!(r.confidence(), 66);
        assert_eq!(r.action().default_action, ActionId::ConnectTeleconsult);
        assert_eq!(dummy.calls(), 1);
    }

    #[tokio::test]
    async fn every_remote_error_kind_falls_back() {
        let replies = [
            DummyProvider::failing(ProviderError::Transport("refused".into())),
            DummyProvider::failing(ProviderError::Unauthorized("bad key".into())),
            DummyProvider::replying("not json"),
            DummyProvider::replying(r#"{"tier":9,"assessment":"x","recommendations":["y"]}"#),
        ];
        let expected = FallbackClassifier::builtin().classify("fever and rash", Language::En);
        for dummy in replies {
            let orch = with_provider(dummy);
            let r = orch.classify("fever and rash", Language::En).await;
            assert_eq!(r, expected);
        }
    }

    #[tokio::test]
    async fn blank_text_skips_remote() {
        let dummy = DummyProvider::replying(r#"{"tier":1,"assessment":"x","recommendations":["y"]}"#);
        let orch = with_provider(dummy.clone());
        let r = orch.classify("   ", Language::Ta).await;
        assert_eq!(r.tier(), Tier::Mild);
        assert_eq!(r.confidence(), 70);
        assert_eq!(dummy.calls(), 0);
    }

    #[tokio::test]
    async fn config_provider_echo_falls_back() {
        let mut cfg = Config::test_default();
        cfg.api_key = Some(ApiKey::new("k"));
        let orch = TriageOrchestrator::from_config(&cfg);
        assert!(orch.is_remote_enabled());
        let r = orch.classify("high fever", Language::En).await;
        assert_eq!(r.tier(), Tier::Severe);
        assert_eq!(r.confidence(), 85);
    }

    #[tokio::test]
    async fn unknown_provider_means_fallback_only() {
        let mut cfg = Config::test_default();
        cfg.api_key = Some(ApiKey::new("k"));
        cfg.remote.provider = "carrier-pigeon".into();
        let orch = TriageOrchestrator::from_config(&cfg);
        assert!(!orch.is_remote_enabled());
    }

    #[tokio::test]
    async fn config_extra_triggers_and_scope_apply() {
        let mut cfg = Config::test_default();
        cfg.catalog.insert(
            Language::En,
            crate::config::ExtraTriggers { tier1: vec!["Snake Bite".into()], ..Default::default() },
        );
        let orch = TriageOrchestrator::from_config(&cfg);
        assert_eq!(orch.classify("a snake bite on the leg", Language::En).await.tier(), Tier::Critical);

        // Hindi critical term typed with English selected.
        assert_eq!(orch.classify("सांस", Language::En).await.tier(), Tier::Mild);
        cfg.match_scope = MatchScope::AllLanguages;
        let orch = TriageOrchestrator::from_config(&cfg);
        assert_eq!(orch.classify("सांस", Language::En).await.tier(), Tier::Critical);
    }

    #[test]
    fn slot_keeps_only_latest_ticket() {
        let fb = FallbackClassifier::builtin();
        let slot = ResultSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(second > first);

        let newer = fb.classify("chest pain", Language::En);
        let older = fb.classify("cough", Language::En);
        assert!(slot.offer(second, newer.clone()));
        assert!(!slot.offer(first, older));
        assert_eq!(slot.current(), Some(newer));
    }

    #[test]
    fn empty_slot_has_no_result() {
        assert_eq!(ResultSlot::new().current(), None);
    }
}
