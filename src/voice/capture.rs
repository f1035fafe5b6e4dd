//! Speech capture platform boundary.
//!
//! Any recognizer exposing an availability check, a permission gate,
//! `start`/`stop` with a language tag, and a stream of [`RecognizerEvent`]s
//! can drive a [`VoiceSession`](super::VoiceSession).

use std::future::Future;

use thiserror::Error;

/// Where the capture would run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureContext {
    /// Whether the host environment counts as secure (e.g. served over HTTPS).
    pub secure: bool,
    pub host: String,
}

impl CaptureContext {
    pub fn secure(host: impl Into<String>) -> Self {
        Self { secure: true, host: host.into() }
    }

    pub fn insecure(host: impl Into<String>) -> Self {
        Self { secure: false, host: host.into() }
    }

    pub fn is_localhost(&self) -> bool {
        matches!(self.host.as_str(), "localhost" | "127.0.0.1" | "::1" | "[::1]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureFault {
    #[error("speech recognizer not available")]
    RecognizerUnavailable,
    #[error("capture device error: {0}")]
    Device(String),
}

/// Recognizer lifecycle events, in the order a platform reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    Started,
    Transcript(String),
    /// Platform error code, e.g. `no-speech`.
    Error(String),
    Ended,
}

pub trait SpeechCapture {
    /// Whether the capture API exists at all on this platform.
    fn is_available(&self) -> bool;

    fn context(&self) -> CaptureContext;

    /// Ask for microphone access. May suspend on a user prompt.
    fn request_permission(&mut self) -> impl Future<Output = PermissionDecision> + Send;

    /// Begin recognition in `speech_tag` (e.g. `hi-IN`).
    fn start(&mut self, speech_tag: &str) -> Result<(), CaptureFault>;

    /// Stop recognition and release the microphone. Must be idempotent.
    fn stop(&mut self);
}
