//! Symptom triage core.
//!
//! - **types**: `Tier`, `TriageResult`, `ActionDescriptor`.
//! - **language** / **bundle**: supported languages and their localized strings.
//! - **catalog** / **fallback**: keyword catalog and the offline rule-based classifier.
//! - **remote**: LLM-backed classification with strict reply validation.
//! - **orchestrator**: the total `classify` entry point and `ResultSlot`.
//! - **action**: tier → call-to-action mapping.
//! - **buffer**: caller-owned symptom text buffer.

pub mod action;
pub mod buffer;
pub mod bundle;
pub mod catalog;
pub mod fallback;
pub mod language;
pub mod orchestrator;
pub mod remote;
pub mod types;

pub use buffer::{BodyArea, SymptomBuffer};
pub use bundle::{BundleSet, InvalidBundle, StringBundle};
pub use catalog::{KeywordCatalog, MatchScope};
pub use fallback::FallbackClassifier;
pub use language::Language;
pub use orchestrator::{ResultSlot, Ticket, TriageOrchestrator};
pub use remote::{RemoteClassificationError, RemoteClassifier};
pub use types::{ActionDescriptor, ActionId, ButtonVariant, Tier, TriageResult, UrgencyColour};
