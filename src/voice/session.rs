//! Voice capture session state machine.
//!
//! `Idle → RequestingPermission → Listening → Idle`. Every path back to
//! `Idle` from a state that may hold the microphone calls `stop()` on the
//! capture, including teardown on drop.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::VoiceConfig;
use crate::triage::buffer::SymptomBuffer;
use crate::triage::bundle::StringBundle;
use crate::triage::language::Language;

use super::capture::{CaptureFault, PermissionDecision, RecognizerEvent, SpeechCapture};
use super::error::{VoiceError, VoiceErrorKind};

/// Where a capture stands.
///
/// There is no separate finishing state: `SpeechCapture::stop` is
/// synchronous, so a capture that ends goes from `Listening` straight to
/// `Idle` in the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    RequestingPermission,
    Listening,
}

/// Transient guidance shown while a capture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceHint {
    /// Start requested; waiting for permission and the recognizer.
    Preparing,
    /// The recognizer reported that it started.
    Listening,
}

impl VoiceHint {
    pub fn text(self, bundle: &StringBundle) -> &str {
        match self {
            VoiceHint::Preparing => &bundle.voice.preparing,
            VoiceHint::Listening => &bundle.voice.listening,
        }
    }
}

pub struct VoiceSession<C: SpeechCapture> {
    capture: C,
    language: Language,
    allow_localhost: bool,
    state: VoiceState,
    hint: Option<VoiceHint>,
}

impl<C: SpeechCapture> VoiceSession<C> {
    pub fn new(capture: C, language: Language, config: &VoiceConfig) -> Self {
        Self {
            capture,
            language,
            allow_localhost: config.allow_localhost,
            state: VoiceState::Idle,
            hint: None,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn hint(&self) -> Option<VoiceHint> {
        self.hint
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Applies to the next capture; a running one keeps its language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Start a capture, or cancel the one in progress.
    ///
    /// From `Idle` this checks the capture API and the context, asks for
    /// permission and starts the recognizer. While `Listening` it stops the
    /// capture and returns to `Idle` without touching any buffer.
    pub async fn toggle_capture(&mut self) -> Result<(), VoiceError> {
        match self.state {
            VoiceState::Listening | VoiceState::RequestingPermission => {
                debug!("voice capture cancelled");
                self.teardown();
                Ok(())
            }
            VoiceState::Idle => self.start_capture().await,
        }
    }

    async fn start_capture(&mut self) -> Result<(), VoiceError> {
        if !self.capture.is_available() {
            return Err(VoiceError::new(VoiceErrorKind::Unsupported));
        }

        let ctx = self.capture.context();
        if !ctx.secure && !(self.allow_localhost && ctx.is_localhost()) {
            debug!(host = %ctx.host, "voice capture refused in insecure context");
            return Err(VoiceError::new(VoiceErrorKind::InsecureContext));
        }

        let guard = ResetOnCancel::arm(&mut self.state, &mut self.hint);
        let decision = self.capture.request_permission().await;
        guard.disarm();

        if decision == PermissionDecision::Denied {
            self.reset();
            return Err(VoiceError::new(VoiceErrorKind::PermissionDenied));
        }

        match self.capture.start(self.language.speech_tag()) {
            Ok(()) => {
                debug!(lang = self.language.speech_tag(), "voice capture listening");
                self.state = VoiceState::Listening;
                Ok(())
            }
            Err(CaptureFault::RecognizerUnavailable) => {
                self.reset();
                Err(VoiceError::new(VoiceErrorKind::Unsupported))
            }
            Err(CaptureFault::Device(detail)) => {
                warn!(error = %detail, "voice capture device failure");
                self.teardown();
                Err(VoiceError::with_detail(VoiceErrorKind::AudioCaptureFailure, detail))
            }
        }
    }

    /// Apply one recognizer event. Events outside `Listening` are ignored.
    ///
    /// A transcript is appended to `buffer` and ends the capture; an error
    /// ends it and is returned for display.
    pub fn handle_event(
        &mut self,
        event: RecognizerEvent,
        buffer: &mut SymptomBuffer,
    ) -> Option<VoiceError> {
        if self.state != VoiceState::Listening {
            debug!(state = ?self.state, "recognizer event ignored outside listening");
            return None;
        }

        match event {
            RecognizerEvent::Started => {
                self.hint = Some(VoiceHint::Listening);
                None
            }
            RecognizerEvent::Transcript(text) => {
                let text = text.trim();
                debug!(transcript_len = text.len(), "voice transcript received");
                if !text.is_empty() {
                    buffer.append_transcript(text);
                }
                self.teardown();
                None
            }
            RecognizerEvent::Error(code) => {
                let err = VoiceError::from_recognizer_code(&code);
                debug!(code = %code, "recognizer error");
                self.teardown();
                Some(err)
            }
            RecognizerEvent::Ended => {
                self.teardown();
                None
            }
        }
    }

    /// Drain `events` until the session leaves `Listening` or the sender goes away.
    pub async fn run_events(
        &mut self,
        events: &mut mpsc::Receiver<RecognizerEvent>,
        buffer: &mut SymptomBuffer,
    ) -> Option<VoiceError> {
        while self.state == VoiceState::Listening {
            let Some(event) = events.recv().await else {
                debug!("recognizer event stream closed");
                self.teardown();
                return None;
            };
            if let Some(err) = self.handle_event(event, buffer) {
                return Some(err);
            }
        }
        None
    }

    /// Return to `Idle` from any state, stopping the capture.
    pub fn teardown(&mut self) {
        self.capture.stop();
        self.reset();
    }

    fn reset(&mut self) {
        self.state = VoiceState::Idle;
        self.hint = None;
    }
}

/// Holds the session in `RequestingPermission` for the length of the
/// permission prompt. If the prompt future is dropped before it resolves,
/// the session falls back to `Idle` with no hint. Nothing was started, so
/// there is nothing to stop.
struct ResetOnCancel<'a> {
    state: &'a mut VoiceState,
    hint: &'a mut Option<VoiceHint>,
    armed: bool,
}

impl<'a> ResetOnCancel<'a> {
    fn arm(state: &'a mut VoiceState, hint: &'a mut Option<VoiceHint>) -> Self {
        *state = VoiceState::RequestingPermission;
        *hint = Some(VoiceHint::Preparing);
        Self { state, hint, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ResetOnCancel<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("permission prompt abandoned");
            *self.state = VoiceState::Idle;
            *self.hint = None;
        }
    }
}

impl<C: SpeechCapture> Drop for VoiceSession<C> {
    fn drop(&mut self) {
        if self.state != VoiceState::Idle {
            self.teardown();
        }
    }
}
