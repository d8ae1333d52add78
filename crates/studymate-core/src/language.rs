//! Explanation language variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The language variant used for explanations, doubt answers, and quizzes.
///
/// Chosen once when the user enters a study session and carried for every
/// backend call in that session. Serialized lowercase on the wire
/// (`hinglish`, `hindi`, `english`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Hindi-English mix (the default).
    #[default]
    Hinglish,
    /// Pure Hindi.
    Hindi,
    /// English.
    English,
}

impl Language {
    /// Returns the wire-format name of this language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hinglish => "hinglish",
            Self::Hindi => "hindi",
            Self::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hinglish" => Ok(Self::Hinglish),
            "hindi" => Ok(Self::Hindi),
            "english" => Ok(Self::English),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Language::Hinglish).unwrap(),
            "\"hinglish\""
        );
        assert_eq!(
            serde_json::from_str::<Language>("\"hindi\"").unwrap(),
            Language::Hindi
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("klingon".parse::<Language>().is_err());
    }
}
