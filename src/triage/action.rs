//! Tier → primary action mapping.

use super::bundle::StringBundle;
use super::types::{ActionDescriptor, ActionId, ButtonVariant, Tier};

/// The action descriptor for `tier`, labelled from `bundle`.
pub fn describe(tier: Tier, bundle: &StringBundle) -> ActionDescriptor {
    let (icon_id, variant, default_action) = match tier {
        Tier::Critical => ("ambulance", ButtonVariant::Destructive, ActionId::DialEmergency),
        Tier::Severe => ("building-2", ButtonVariant::Primary, ActionId::BookFacilityVisit),
        Tier::Moderate => ("video", ButtonVariant::Primary, ActionId::ConnectTeleconsult),
        Tier::Mild => ("message-circle", ButtonVariant::Outline, ActionId::ChatHealthWorker),
    };
    ActionDescriptor {
        label: bundle.action_labels.get(tier).clone(),
        icon_id,
        variant,
        default_action,
    }
}
