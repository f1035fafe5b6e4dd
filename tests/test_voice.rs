//! Voice session driven by a scripted recognizer, feeding classification.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use triage_engine::config::VoiceConfig;
use triage_engine::triage::{BodyArea, FallbackClassifier, Language, SymptomBuffer, Tier};
use triage_engine::voice::{
    CaptureContext, CaptureFault, PermissionDecision, RecognizerEvent, SpeechCapture,
    VoiceErrorKind, VoiceSession, VoiceState,
};

/// Tracks whether the microphone is currently held.
struct Mic {
    open: Arc<AtomicBool>,
}

impl SpeechCapture for Mic {
    fn is_available(&self) -> bool {
        true
    }

    fn context(&self) -> CaptureContext {
        CaptureContext::insecure("localhost")
    }

    async fn request_permission(&mut self) -> PermissionDecision {
        tokio::task::yield_now().await;
        PermissionDecision::Granted
    }

    fn start(&mut self, _speech_tag: &str) -> Result<(), CaptureFault> {
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        self.open.store(false, Ordering::SeqCst);
    }
}

fn session(language: Language) -> (VoiceSession<Mic>, Arc<AtomicBool>) {
    let open = Arc::new(AtomicBool::new(false));
    let mic = Mic { open: open.clone() };
    (VoiceSession::new(mic, language, &VoiceConfig { allow_localhost: true }), open)
}

#[tokio::test]
async fn toggle_twice_cancels_and_releases_mic() {
    let (mut s, open) = session(Language::En);
    let mut buffer = SymptomBuffer::new();

    s.toggle_capture().await.unwrap();
    assert_eq!(s.state(), VoiceState::Listening);
    assert!(open.load(Ordering::SeqCst));

    s.toggle_capture().await.unwrap();
    assert_eq!(s.state(), VoiceState::Idle);
    assert!(!open.load(Ordering::SeqCst));
    assert!(buffer.is_blank());

    assert!(s.handle_event(RecognizerEvent::Transcript("cough".into()), &mut buffer).is_none());
    assert!(buffer.is_blank());
}

#[tokio::test]
async fn spoken_symptoms_reach_the_classifier() {
    let (mut s, open) = session(Language::Hi);
    let mut buffer = SymptomBuffer::new();
    buffer.add_body_area(BodyArea::Chest);

    let (tx, mut rx) = mpsc::channel(8);
    s.toggle_capture().await.unwrap();
    tokio::spawn(async move {
        let _ = tx.send(RecognizerEvent::Started).await;
        let _ = tx.send(RecognizerEvent::Transcript("सांस नहीं आ रही".into())).await;
        let _ = tx.send(RecognizerEvent::Ended).await;
    });

    assert!(s.run_events(&mut rx, &mut buffer).await.is_none());
    assert_eq!(buffer.as_str(), "Chest pain सांस नहीं आ रही");
    assert!(!open.load(Ordering::SeqCst));

    let r = FallbackClassifier::builtin().classify(buffer.as_str(), Language::Hi);
    assert_eq!(r.tier(), Tier::Critical);
}

#[tokio::test]
async fn audio_error_is_recoverable() {
    let (mut s, open) = session(Language::Pa);
    let mut buffer = SymptomBuffer::new();

    s.toggle_capture().await.unwrap();
    let err = s
        .handle_event(RecognizerEvent::Error("audio-capture".into()), &mut buffer)
        .unwrap();
    assert_eq!(err.kind, VoiceErrorKind::AudioCaptureFailure);
    assert_eq!(s.state(), VoiceState::Idle);
    assert!(!open.load(Ordering::SeqCst));

    s.toggle_capture().await.unwrap();
    assert_eq!(s.state(), VoiceState::Listening);
}

#[tokio::test]
async fn dropping_the_session_closes_the_mic() {
    let (mut s, open) = session(Language::Ta);
    s.toggle_capture().await.unwrap();
    assert!(open.load(Ordering::SeqCst));
    drop(s);
    assert!(!open.load(Ordering::SeqCst));
}
