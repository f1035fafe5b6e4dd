//! The shipped config file must load and keep the offline defaults.

use std::path::Path;

use triage_engine::config::{self, Overrides};
use triage_engine::triage::{Language, MatchScope, TriageOrchestrator};

#[test]
fn default_config_file_loads() {
    let cfg = config::load_from(Path::new("config/default.toml"), &Overrides::default()).unwrap();
    assert_eq!(cfg.language, Language::En);
    assert_eq!(cfg.match_scope, MatchScope::SelectedLanguage);
    assert_eq!(cfg.remote.provider, "gemini");
    assert!(cfg.api_key.is_none());
    assert!(cfg.voice.allow_localhost);
}

#[test]
fn default_config_never_enables_remote_without_key() {
    let cfg = config::load_from(Path::new("config/default.toml"), &Overrides::default()).unwrap();
    assert!(!TriageOrchestrator::from_config(&cfg).is_remote_enabled());
}

#[test]
fn overlay_inherits_from_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let base = std::fs::canonicalize("config/default.toml").unwrap();
    let overlay = dir.path().join("clinic.toml");
    std::fs::write(
        &overlay,
        format!(
            "[meta]\nbase = {:?}\n\n[triage]\nlanguage = \"ta\"\n\n[catalog.ta]\ntier1 = [\"மயக்கம்\"]\n",
            base.display().to_string()
        ),
    )
    .unwrap();

    let cfg = config::load_from(&overlay, &Overrides::default()).unwrap();
    assert_eq!(cfg.language, Language::Ta);
    assert_eq!(cfg.remote.gemini.model, "gemini-pro");
    assert_eq!(cfg.catalog[&Language::Ta].tier1, vec!["மயக்கம்".to_string()]);
}
