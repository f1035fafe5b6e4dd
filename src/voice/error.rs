//! Voice capture errors and their localized hints.

use thiserror::Error;

use crate::triage::bundle::StringBundle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceErrorKind {
    PermissionDenied,
    Unsupported,
    InsecureContext,
    NoSpeech,
    AudioCaptureFailure,
    Other,
}

/// A transient, non-fatal voice failure. The session is back in `Idle`
/// whenever one of these is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("voice capture failed ({kind:?}){}", detail_suffix(.detail))]
pub struct VoiceError {
    pub kind: VoiceErrorKind,
    /// Platform error code or device message, if any.
    pub detail: Option<String>,
}

impl VoiceError {
    pub fn new(kind: VoiceErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail(kind: VoiceErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: Some(detail.into()) }
    }

    /// Map a recognizer error code (`no-speech`, `audio-capture`, …).
    pub fn from_recognizer_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::new(VoiceErrorKind::NoSpeech),
            "audio-capture" => Self::new(VoiceErrorKind::AudioCaptureFailure),
            "not-allowed" | "service-not-allowed" => Self::new(VoiceErrorKind::PermissionDenied),
            other => Self::with_detail(VoiceErrorKind::Other, other),
        }
    }

    /// User-facing message in the bundle's language.
    pub fn hint(&self, bundle: &StringBundle) -> String {
        let v = &bundle.voice;
        match self.kind {
            VoiceErrorKind::PermissionDenied => v.permission_denied.clone(),
            VoiceErrorKind::Unsupported => v.unsupported.clone(),
            VoiceErrorKind::InsecureContext => v.insecure_context.clone(),
            VoiceErrorKind::NoSpeech => v.no_speech.clone(),
            VoiceErrorKind::AudioCaptureFailure => v.audio_capture.clone(),
            VoiceErrorKind::Other => {
                v.other_error.replace("{error}", self.detail.as_deref().unwrap_or("unknown"))
            }
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}
