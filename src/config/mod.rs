//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `TRIAGE_LOG_LEVEL` and `TRIAGE_LANGUAGE` env overrides.
//! The remote credential comes from `TRIAGE_API_KEY`; its absence is the
//! normal fallback-only configuration, not an error.
//!
//! # Module layout
//!
//! - **types**: Public configuration structs (`Config`, `RemoteConfig`, …).
//! - **raw**: Raw TOML deserialization types; mirror the file shape, private.
//! - **load**: `merge_toml`, `load_raw_merged`, `load`, `load_from`.

mod load;
mod raw;
mod types;

pub use load::{defaults, expand_home, load, load_from, Overrides};
pub use types::*;

#[cfg(test)]
impl Config {
    /// Safe `Config` for unit tests: dummy provider, no API key, no external calls.
    pub fn test_default() -> Self {
        Self {
            log_level: "info".into(),
            language: crate::triage::language::Language::En,
            match_scope: crate::triage::catalog::MatchScope::SelectedLanguage,
            remote: RemoteConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: "http://localhost:0/v1beta".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            catalog: std::collections::HashMap::new(),
            voice: VoiceConfig { allow_localhost: true },
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::catalog::MatchScope;
    use crate::triage::language::Language;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.language, Language::En);
        assert_eq!(cfg.match_scope, MatchScope::SelectedLanguage);
        assert_eq!(cfg.remote.provider, "gemini");
        assert_eq!(cfg.remote.gemini.model, "gemini-pro");
        assert!(cfg.voice.allow_localhost);
        assert!(!cfg.remote_enabled());
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(
            r#"
[triage]
log_level = "debug"
language = "ta"
match_scope = "all"

[remote]
provider = "openai"

[remote.openai]
api_base_url = "http://127.0.0.1:11434/v1/chat/completions"
model = "llama3"
timeout_seconds = 5

[catalog.hi]
tier1 = ["बेहोश"]

[voice]
allow_localhost = false
"#,
        );
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.language, Language::Ta);
        assert_eq!(cfg.match_scope, MatchScope::AllLanguages);
        assert_eq!(cfg.remote.provider, "openai");
        assert_eq!(cfg.remote.openai.model, "llama3");
        assert_eq!(cfg.remote.openai.timeout_seconds, 5);
        assert_eq!(cfg.catalog[&Language::Hi].tier1, vec!["बेहोश".to_string()]);
        assert!(!cfg.voice.allow_localhost);
    }

    #[test]
    fn overrides_win_over_file() {
        let f = write_toml("[triage]\nlog_level = \"warn\"\nlanguage = \"en\"\n");
        let overrides = Overrides {
            log_level: Some("trace".into()),
            language: Some("pa".into()),
            api_key: Some("  key-123  ".into()),
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.log_level, "trace");
        assert_eq!(cfg.language, Language::Pa);
        assert_eq!(cfg.api_key.as_ref().map(|k| k.expose()), Some("key-123"));
    }

    #[test]
    fn blank_api_key_means_fallback_only() {
        let overrides = Overrides { api_key: Some("   ".into()), ..Overrides::default() };
        let cfg = defaults(&overrides).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn unknown_language_is_config_error() {
        let f = write_toml("[triage]\nlanguage = \"fr\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn unknown_catalog_language_is_config_error() {
        let f = write_toml("[catalog.xx]\ntier1 = [\"a\"]\n");
        assert!(load_from(f.path(), &Overrides::default()).is_err());
    }

    #[test]
    fn base_inheritance_merges_tables() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[triage]\nlanguage = \"hi\"\nlog_level = \"warn\"\n[remote]\nprovider = \"dummy\"\n",
        )
        .unwrap();
        let child = dir.path().join("child.toml");
        std::fs::write(&child, "[meta]\nbase = \"base.toml\"\n[triage]\nlog_level = \"debug\"\n").unwrap();

        let cfg = load_from(&child, &Overrides::default()).unwrap();
        assert_eq!(cfg.language, Language::Hi);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.remote.provider, "dummy");
    }

    #[test]
    fn circular_base_is_rejected() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.toml");
        let b = dir.path().join("b.toml");
        std::fs::write(&a, "[meta]\nbase = \"b.toml\"\n").unwrap();
        std::fs::write(&b, "[meta]\nbase = \"a.toml\"\n").unwrap();
        let err = load_from(&a, &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/etc/triage.toml"), std::path::PathBuf::from("/etc/triage.toml"));
        assert_eq!(expand_home("config/a~b.toml"), std::path::PathBuf::from("config/a~b.toml"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/triage.toml"), home.join("triage.toml"));
        }
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load_from(std::path::Path::new("/nonexistent/triage.toml"), &Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
