//! Supported patient languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language of the symptom text and of every string shown back to the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Pa,
    Ta,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Hi, Language::Pa, Language::Ta];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Pa => "pa",
            Language::Ta => "ta",
        }
    }

    /// English name of the language, as used in the remote prompt.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Pa => "Punjabi",
            Language::Ta => "Tamil",
        }
    }

    /// BCP 47 tag handed to the speech recognizer.
    pub fn speech_tag(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Hi => "hi-IN",
            Language::Pa => "pa-IN",
            Language::Ta => "ta-IN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language '{0}' (expected one of: en, hi, pa, ta)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            "pa" | "punjabi" => Ok(Language::Pa),
            "ta" | "tamil" => Ok(Language::Ta),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!(" Tamil ".parse::<Language>().unwrap(), Language::Ta);
        assert_eq!("PA".parse::<Language>().unwrap(), Language::Pa);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn speech_tags() {
        let tags: Vec<&str> = Language::ALL.iter().map(|l| l.speech_tag()).collect();
        assert_eq!(tags, vec!["en-US", "hi-IN", "pa-IN", "ta-IN"]);
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Pa).unwrap(), "\"pa\"");
        let l: Language = serde_json::from_str("\"ta\"").unwrap();
        assert_eq!(l, Language::Ta);
    }
}
