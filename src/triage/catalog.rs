//! Keyword catalog: per-language, per-tier trigger substrings.
//!
//! Triggers are stored lower-cased and matched as substrings of the
//! lower-cased symptom text. `Mild` carries no triggers; it is the default.

use std::collections::HashMap;

use serde::Deserialize;

use super::language::Language;
use super::types::Tier;

/// Which languages' triggers are searched for a given request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MatchScope {
    /// Only the triggers of the request language.
    #[default]
    #[serde(rename = "language")]
    SelectedLanguage,
    /// Triggers of every language, still tier by tier.
    #[serde(rename = "all")]
    AllLanguages,
}

const BUILTIN: &[(Language, Tier, &[&str])] = &[
    (Language::En, Tier::Critical, &["chest pain", "breathing", "unconscious", "heart", "bleeding", "accident"]),
    (Language::En, Tier::Severe, &["stomach", "fracture", "high fever", "vomit", "abdominal", "injury"]),
    (Language::En, Tier::Moderate, &["fever", "cough", "rash", "cold", "flu", "headache"]),
    (Language::Hi, Tier::Critical, &["सांस", "सीने", "खून"]),
    (Language::Hi, Tier::Severe, &["पेट", "तेज बुखार", "उल्टी"]),
    (Language::Hi, Tier::Moderate, &["बुखार", "खांसी", "सर दर्द"]),
    (Language::Pa, Tier::Critical, &["ਸਾਹ", "ਛਾਤੀ", "ਖੂਨ"]),
    (Language::Pa, Tier::Severe, &["ਪੇਟ", "ਤੇਜ਼ ਬੁਖਾਰ", "ਉਲਟੀਆਂ"]),
    (Language::Pa, Tier::Moderate, &["ਬੁਖਾਰ", "ਖੰਘ", "ਸਿਰ ਦਰਦ"]),
    (Language::Ta, Tier::Critical, &["நெஞ்சு", "மூச்சு", "இரத்தம்"]),
    (Language::Ta, Tier::Severe, &["வயிறு", "காய்ச்சல்", "வாந்தி"]),
    (Language::Ta, Tier::Moderate, &["தலைவலி", "இருமல்", "சளி"]),
];

#[derive(Debug, Clone, Default)]
pub struct KeywordCatalog {
    entries: HashMap<(Language, Tier), Vec<String>>,
}

impl KeywordCatalog {
    /// A catalog with no triggers at all: everything classifies as `Mild`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in triggers for en, hi, pa and ta.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for (language, tier, triggers) in BUILTIN {
            catalog.insert(*language, *tier, triggers.iter().copied());
        }
        catalog
    }

    /// Append triggers to the `(language, tier)` entry. Blank triggers are skipped.
    pub fn insert<I, S>(&mut self, language: Language, tier: Tier, triggers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.entries.entry((language, tier)).or_default();
        for trigger in triggers {
            let trigger = trigger.as_ref().trim().to_lowercase();
            if !trigger.is_empty() && !entry.contains(&trigger) {
                entry.push(trigger);
            }
        }
    }

    pub fn triggers(&self, language: Language, tier: Tier) -> &[String] {
        self.entries
            .get(&(language, tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any `(language, tier)` trigger occurs in `normalized`.
    /// `normalized` must already be lower-cased.
    pub fn matches(&self, language: Language, tier: Tier, normalized: &str) -> bool {
        self.triggers(language, tier)
            .iter()
            .any(|t| normalized.contains(t.as_str()))
    }

    /// Whether `tier` matches `normalized` in any language allowed by `scope`.
    pub fn matches_in_scope(
        &self,
        scope: MatchScope,
        language: Language,
        tier: Tier,
        normalized: &str,
    ) -> bool {
        match scope {
            MatchScope::SelectedLanguage => self.matches(language, tier, normalized),
            MatchScope::AllLanguages => Language::ALL
                .iter()
                .any(|l| self.matches(*l, tier, normalized)),
        }
    }
}
