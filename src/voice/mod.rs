//! Voice symptom entry.
//!
//! [`VoiceSession`] drives a platform [`SpeechCapture`] through permission,
//! listening and teardown, appending transcripts to a caller-owned
//! [`SymptomBuffer`](crate::triage::SymptomBuffer). Failures come back as
//! [`VoiceError`]s with localized hints; none of them are fatal.

pub mod capture;
pub mod error;
pub mod session;

pub use capture::{CaptureContext, CaptureFault, PermissionDecision, RecognizerEvent, SpeechCapture};
pub use error::{VoiceError, VoiceErrorKind};
pub use session::{VoiceHint, VoiceSession, VoiceState};
