//! Stderr logging for the binary.
//!
//! The engine's own events follow the requested level. Everything else,
//! the HTTP stack in particular, is capped at `warn`: at `trace` reqwest and
//! hyper print request lines, and the Gemini endpoint carries its key in the
//! query string. `RUST_LOG` replaces the whole policy when the level did not
//! come from the command line.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const CRATE_TARGET: &str = "triage_engine";

/// Install the global subscriber.
///
/// `prefer_level` is set when the level came from `-v` flags; `RUST_LOG` is
/// then ignored.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(level, prefer_level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Filter directives for `level`: the crate at `level`, every other target
/// at `level` or `warn`, whichever is quieter.
pub fn default_directives(level: &str) -> Result<String, AppError> {
    let own = parse_level(level)?;
    let others = own.min(LevelFilter::WARN);
    Ok(format!("{},{CRATE_TARGET}={}", lower(others), lower(own)))
}

fn build_filter(
    level: &str,
    prefer_level: bool,
    rust_log: Option<&str>,
) -> Result<EnvFilter, AppError> {
    let directives = default_directives(level)?;

    if !prefer_level {
        let from_env = rust_log
            .filter(|s| !s.trim().is_empty())
            .and_then(|env| EnvFilter::try_new(env).ok());
        if let Some(filter) = from_env {
            return Ok(filter);
        }
    }

    EnvFilter::try_new(&directives)
        .map_err(|e| AppError::Logger(format!("invalid filter '{directives}': {e}")))
}

/// Parse a level name, rejecting empty or unknown values.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    let level = level.trim();
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

fn lower(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_keeps_dependencies_at_warn() {
        assert_eq!(default_directives("trace").unwrap(), "warn,triage_engine=trace");
        assert_eq!(default_directives("debug").unwrap(), "warn,triage_engine=debug");
    }

    #[test]
    fn quiet_levels_apply_everywhere() {
        assert_eq!(default_directives("warn").unwrap(), "warn,triage_engine=warn");
        assert_eq!(default_directives("error").unwrap(), "error,triage_engine=error");
    }

    #[test]
    fn unknown_levels_are_rejected() {
        assert!(default_directives("verbose").is_err());
        assert!(parse_level("").is_err());
        assert!(parse_level("INFO_LEVEL").is_err());
    }

    #[test]
    fn cli_level_ignores_rust_log() {
        let filter = build_filter("trace", true, Some("trace")).unwrap();
        let shown = filter.to_string().to_ascii_lowercase();
        assert!(shown.contains("triage_engine=trace"), "{shown}");
        assert!(!shown.contains("hyper"), "{shown}");
    }

    #[test]
    fn rust_log_replaces_defaults_unless_invalid() {
        let filter = build_filter("info", false, Some("reqwest=debug")).unwrap();
        let shown = filter.to_string().to_ascii_lowercase();
        assert!(shown.contains("reqwest=debug"), "{shown}");
        assert!(!shown.contains("triage_engine"), "{shown}");

        let filter = build_filter("info", false, Some("reqwest=loud")).unwrap();
        assert!(filter.to_string().to_ascii_lowercase().contains("triage_engine=info"));

        let filter = build_filter("info", false, Some("  ")).unwrap();
        assert!(filter.to_string().to_ascii_lowercase().contains("triage_engine=info"));
    }

    #[test]
    fn init_succeeds_or_already_init() {
        match init("info", true) {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
