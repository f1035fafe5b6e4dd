//! Multilingual symptom triage engine.
//!
//! [`triage::TriageOrchestrator::classify`] turns free-text symptoms in one of
//! the supported languages into a [`triage::TriageResult`]: urgency tier,
//! localized assessment and care steps, and a call-to-action. A remote LLM
//! classifier is used when a credential is configured; the offline keyword
//! classifier covers every other case, so `classify` never fails.

pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod triage;
pub mod voice;
