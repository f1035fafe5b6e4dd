//! Triage engine command-line entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the orchestrator (remote classifier only with a credential)
//!   6. Classify the symptom text once and print the result as JSON

use std::io::{IsTerminal as _, Read as _};

use tracing::info;

use triage_engine::error::AppError;
use triage_engine::triage::{Language, TriageOrchestrator};
use triage_engine::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    let force_cli_level = args.log_level.is_some();
    logger::init(effective_log_level, force_cli_level)?;

    let language = match args.language.as_deref() {
        Some(code) => code.parse::<Language>()?,
        None => config.language,
    };

    let orchestrator = TriageOrchestrator::from_config(&config);

    info!(
        %language,
        match_scope = ?config.match_scope,
        remote = orchestrator.is_remote_enabled(),
        provider = %config.remote.provider,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let text = if args.text.is_empty() {
        read_stdin()?
    } else {
        args.text.join(" ")
    };

    let result = orchestrator.classify(&text, language).await;

    info!(tier = %result.tier(), confidence = result.confidence(), "classification complete");
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn read_stdin() -> Result<String, AppError> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("enter symptoms, then Ctrl-D:");
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    language: Option<String>,
    text: Vec<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut language = None;
    let mut text = Vec::new();

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            text.extend(iter.by_ref());
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: triage-engine [OPTIONS] [SYMPTOMS...]");
                println!();
                println!("Classifies the symptom text (or stdin when none is given) and prints JSON.");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -l, --language <CODE>      Patient language: en, hi, pa, ta (default: from config)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                println!();
                println!("Environment:");
                println!("  TRIAGE_API_KEY             Remote classifier credential (unset = offline only)");
                println!("  TRIAGE_LANGUAGE, TRIAGE_LOG_LEVEL");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "-l" | "--language" => {
                if let Some(code) = iter.next() {
                    language = Some(code);
                } else {
                    eprintln!("error: -l/--language requires a language code");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => text.push(arg),
        }
    }

    // Each -v raises verbosity one tier from the config default:
    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug  (classification flow, text lengths)
    //   -vvvv+  → trace  (full prompt and reply payloads)
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path, language, text }
}
