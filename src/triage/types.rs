//! Core value types shared by every classification path.
//!
//! A [`TriageResult`] can only be built inside the crate, through
//! [`TriageResult::new`], which derives the [`ActionDescriptor`] from the tier.
//! That keeps `tier` and `action` from ever disagreeing.

use std::fmt;

use serde::{Serialize, Serializer};

use super::action;
use super::bundle::StringBundle;

// ── Tier ──────────────────────────────────────────────────────────────────────

/// Urgency classification. `Critical` (1) is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Critical = 1,
    Severe = 2,
    Moderate = 3,
    Mild = 4,
}

impl Tier {
    /// All tiers in evaluation order. The fallback classifier depends on this order.
    pub const ALL: [Tier; 4] = [Tier::Critical, Tier::Severe, Tier::Moderate, Tier::Mild];

    /// Numeric level, 1..=4.
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Parse a numeric level. Anything outside 1..=4 is `None`.
    pub fn from_level(level: i64) -> Option<Tier> {
        match level {
            1 => Some(Tier::Critical),
            2 => Some(Tier::Severe),
            3 => Some(Tier::Moderate),
            4 => Some(Tier::Mild),
            _ => None,
        }
    }

    /// Confidence reported by the keyword classifier for this tier.
    pub fn fallback_confidence(self) -> u8 {
        match self {
            Tier::Critical => 90,
            Tier::Severe => 85,
            Tier::Moderate => 80,
            Tier::Mild => 70,
        }
    }

    pub fn colour(self) -> UrgencyColour {
        match self {
            Tier::Critical => UrgencyColour::Red,
            Tier::Severe => UrgencyColour::Orange,
            Tier::Moderate => UrgencyColour::Yellow,
            Tier::Mild => UrgencyColour::Green,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

/// Display colour band for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyColour {
    Red,
    Orange,
    Yellow,
    Green,
}

// ── Action descriptor ─────────────────────────────────────────────────────────

/// Button style the presentation layer should use for the primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Destructive,
    Outline,
    Secondary,
}

/// Opaque identifier of the side effect behind the primary action.
/// The core only names it; the presentation layer performs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    DialEmergency,
    BookFacilityVisit,
    ConnectTeleconsult,
    ChatHealthWorker,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::DialEmergency => "dial-emergency",
            ActionId::BookFacilityVisit => "book-facility-visit",
            ActionId::ConnectTeleconsult => "connect-teleconsult",
            ActionId::ChatHealthWorker => "chat-health-worker",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub label: String,
    pub icon_id: &'static str,
    pub variant: ButtonVariant,
    pub default_action: ActionId,
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Outcome of one classification. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageResult {
    tier: Tier,
    colour: UrgencyColour,
    assessment: String,
    recommendations: Vec<String>,
    confidence: u8,
    action: ActionDescriptor,
    disclaimer: String,
}

impl TriageResult {
    /// Build a result for `tier`. The action and disclaimer come from `bundle`;
    /// confidence is capped at 100. Callers guarantee `recommendations` is non-empty.
    pub(crate) fn new(
        tier: Tier,
        assessment: String,
        recommendations: Vec<String>,
        confidence: u8,
        bundle: &StringBundle,
    ) -> Self {
        debug_assert!(!recommendations.is_empty(), "recommendations must not be empty");
        Self {
            tier,
            colour: tier.colour(),
            assessment,
            recommendations,
            confidence: confidence.min(100),
            action: action::describe(tier, bundle),
            disclaimer: bundle.disclaimer.clone(),
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn colour(&self) -> UrgencyColour {
        self.colour
    }

    /// Short localized label, e.g. "CRITICAL EMERGENCY".
    pub fn assessment(&self) -> &str {
        &self.assessment
    }

    /// Care instructions, most important first. Never empty.
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// 0..=100.
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn action(&self) -> &ActionDescriptor {
        &self.action
    }

    /// Fixed advisory notice shown alongside every result.
    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::bundle::BundleSet;
    use crate::triage::language::Language;

    #[test]
    fn tier_levels_roundtrip_through_from_level() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_level(i64::from(tier.level())), Some(tier));
        }
        assert_eq!(Tier::from_level(0), None);
        assert_eq!(Tier::from_level(5), None);
        assert_eq!(Tier::from_level(-1), None);
    }

    #[test]
    fn tiers_are_ordered_by_urgency() {
        assert!(Tier::Critical < Tier::Severe);
        assert!(Tier::Moderate < Tier::Mild);
        assert_eq!(Tier::ALL.first(), Some(&Tier::Critical));
        assert_eq!(Tier::ALL.last(), Some(&Tier::Mild));
    }

    #[test]
    fn fallback_confidence_table() {
        let got: Vec<u8> = Tier::ALL.iter().map(|t| t.fallback_confidence()).collect();
        assert_eq!(got, vec![90, 85, 80, 70]);
    }

    #[test]
    fn new_derives_action_from_tier() {
        let bundles = BundleSet::builtin();
        let en = bundles.get(Language::En);
        let r = TriageResult::new(Tier::Severe, "x".into(), vec!["a".into()], 85, en);
        assert_eq!(r.action(), &action::describe(Tier::Severe, en));
        assert_eq!(r.colour(), UrgencyColour::Orange);
        assert_eq!(r.disclaimer(), en.disclaimer);
    }

    #[test]
    fn new_caps_confidence() {
        let bundles = BundleSet::builtin();
        let r = TriageResult::new(Tier::Mild, "x".into(), vec!["a".into()], 250, bundles.get(Language::En));
        assert_eq!(r.confidence(), 100);
    }

    #[test]
    fn tier_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Tier::Moderate).unwrap(), "3");
        assert_eq!(serde_json::to_string(&ActionId::DialEmergency).unwrap(), "\"dial-emergency\"");
    }
}
