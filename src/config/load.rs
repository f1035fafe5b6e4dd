//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains, and
//! applies `TRIAGE_LOG_LEVEL` / `TRIAGE_LANGUAGE` overrides. The credential
//! is read from `TRIAGE_API_KEY` only.

use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;
use crate::triage::language::Language;

use super::raw::{RawConfig, RawExtraTriggers};
use super::types::*;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub language: Option<String>,
    pub api_key: Option<String>,
}

impl Overrides {
    /// Read `TRIAGE_LOG_LEVEL`, `TRIAGE_LANGUAGE` and `TRIAGE_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("TRIAGE_LOG_LEVEL").ok(),
            language: env::var("TRIAGE_LANGUAGE").ok(),
            api_key: env::var("TRIAGE_API_KEY").ok(),
        }
    }
}

/// Deep-merge two TOML values.
/// Tables are merged recursively; the overlay only needs to specify keys that
/// differ from the base. For every other type the overlay replaces the base.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow any `[meta] base = "..."` chain, and return the
/// fully merged `toml::Value`. `visited` carries canonicalized paths already
/// seen in this chain so circular references are caught early.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay_val: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    if let Some(base_str) = overlay_val
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
    {
        let base_path = if base_str.starts_with('~') || Path::new(base_str).is_absolute() {
            expand_home(base_str)
        } else {
            path.parent().unwrap_or(Path::new(".")).join(base_str)
        };
        let base_val = load_raw_merged(&base_path, visited)?;
        Ok(merge_toml(base_val, overlay_val))
    } else {
        Ok(overlay_val)
    }
}

/// Load config from the given path, or `config/default.toml`, then apply env overrides.
/// Without an explicit path and without `config/default.toml`, built-in defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = Overrides::from_env();

    if let Some(path) = config_path {
        return load_from(&expand_home(path), &overrides);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        resolve(RawConfig::default(), &overrides)
    }
}

/// Load an explicit file. Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let merged_val = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged_val).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    resolve(parsed, overrides)
}

/// Built-in defaults plus overrides; no file involved.
pub fn defaults(overrides: &Overrides) -> Result<Config, AppError> {
    resolve(RawConfig::default(), overrides)
}

fn resolve(parsed: RawConfig, overrides: &Overrides) -> Result<Config, AppError> {
    let t = parsed.triage;

    let log_level = overrides.log_level.clone().unwrap_or(t.log_level);
    let language_str = overrides.language.as_deref().unwrap_or(&t.language);
    let language: Language = language_str
        .parse()
        .map_err(|e| AppError::Config(format!("[triage] language: {e}")))?;

    let catalog = parsed
        .catalog
        .into_iter()
        .map(|(code, extra)| {
            let lang: Language = code
                .parse()
                .map_err(|e| AppError::Config(format!("[catalog.{code}]: {e}")))?;
            Ok((lang, extra_triggers(extra)))
        })
        .collect::<Result<HashMap<_, _>, AppError>>()?;

    let api_key = overrides
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ApiKey::new);

    let r = parsed.remote;
    Ok(Config {
        log_level,
        language,
        match_scope: t.match_scope,
        remote: RemoteConfig {
            provider: r.provider,
            gemini: GeminiConfig {
                api_base_url: r.gemini.api_base_url,
                model: r.gemini.model,
                temperature: r.gemini.temperature,
                timeout_seconds: r.gemini.timeout_seconds.max(1),
            },
            openai: OpenAiConfig {
                api_base_url: r.openai.api_base_url,
                model: r.openai.model,
                temperature: r.openai.temperature,
                timeout_seconds: r.openai.timeout_seconds.max(1),
            },
        },
        catalog,
        voice: VoiceConfig { allow_localhost: parsed.voice.allow_localhost },
        api_key,
    })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

fn extra_triggers(raw: RawExtraTriggers) -> ExtraTriggers {
    ExtraTriggers { tier1: raw.tier1, tier2: raw.tier2, tier3: raw.tier3 }
}
