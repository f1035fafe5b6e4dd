//! Errors that stop the command-line binary.
//!
//! The triage core and the voice session never return these: `classify`
//! always yields a result and voice failures are `VoiceError`s.

use thiserror::Error;

use crate::triage::language::UnknownLanguage;

#[derive(Debug, Error)]
pub enum AppError {
    /// Config file, inheritance chain or override problem.
    #[error("config error: {0}")]
    Config(String),

    /// `-l/--language` named a language the engine has no bundle for.
    #[error("language error: {0}")]
    Language(#[from] UnknownLanguage),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("cannot read symptom text: {0}")]
    Input(#[from] std::io::Error),

    #[error("cannot encode result: {0}")]
    Output(#[from] serde_json::Error),
}
