//! Rule-based fallback classifier.
//!
//! Deterministic and offline. Tiers are tested strictly in the order
//! Critical → Severe → Moderate → Mild and the first tier with a trigger hit
//! wins, so text mentioning both a critical and a moderate symptom is always
//! critical. `Mild` is the default when nothing matches.

use std::sync::Arc;

use tracing::debug;

use super::bundle::BundleSet;
use super::catalog::{KeywordCatalog, MatchScope};
use super::language::Language;
use super::types::{Tier, TriageResult};

#[derive(Debug, Clone)]
pub struct FallbackClassifier {
    catalog: Arc<KeywordCatalog>,
    bundles: Arc<BundleSet>,
    scope: MatchScope,
}

impl FallbackClassifier {
    pub fn new(catalog: Arc<KeywordCatalog>, bundles: Arc<BundleSet>) -> Self {
        Self { catalog, bundles, scope: MatchScope::default() }
    }

    /// Built-in catalog and bundles, strict per-language matching.
    pub fn builtin() -> Self {
        Self::new(Arc::new(KeywordCatalog::builtin()), Arc::new(BundleSet::builtin()))
    }

    pub fn with_scope(mut self, scope: MatchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn bundles(&self) -> &Arc<BundleSet> {
        &self.bundles
    }

    /// Classify `text`. Total: blank or unmatched text yields the `Mild` default.
    pub fn classify(&self, text: &str, language: Language) -> TriageResult {
        let tier = self.match_tier(text, language);
        let bundle = self.bundles.get(language);
        debug!(%language, %tier, text_len = text.len(), "fallback classification");
        TriageResult::new(
            tier,
            bundle.assessments.get(tier).clone(),
            bundle.recommendations.get(tier).clone(),
            tier.fallback_confidence(),
            bundle,
        )
    }

    /// First tier, in priority order, whose triggers occur in `text`.
    pub fn match_tier(&self, text: &str, language: Language) -> Tier {
        let normalized = text.to_lowercase();
        Tier::ALL
            .into_iter()
            .find(|&tier| {
                tier == Tier::Mild
                    || self.catalog.matches_in_scope(self.scope, language, tier, &normalized)
            })
            .unwrap_or(Tier::Mild)
    }
}
