use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of a quiz: which side of a word pair is asked and which is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    /// Prompt with the front side, answer with the back side.
    #[default]
    FrontToBack,
    /// Prompt with the back side, answer with the front side.
    BackToFront,
}

impl QuizMode {
    /// Stable text form used for persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::FrontToBack => "front-to-back",
            QuizMode::BackToFront => "back-to-front",
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            QuizMode::FrontToBack => QuizMode::BackToFront,
            QuizMode::BackToFront => QuizMode::FrontToBack,
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown quiz mode: {raw}")]
pub struct ParseModeError {
    raw: String,
}

impl FromStr for QuizMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "front-to-back" => Ok(QuizMode::FrontToBack),
            "back-to-front" => Ok(QuizMode::BackToFront),
            other => Err(ParseModeError {
                raw: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_its_own_text_form() {
        for mode in [QuizMode::FrontToBack, QuizMode::BackToFront] {
            assert_eq!(mode.as_str().parse::<QuizMode>().unwrap(), mode);
        }
    }

    #[test]
    fn rejects_unknown_text() {
        let err = "en-uz".parse::<QuizMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown quiz mode: en-uz");
    }

    #[test]
    fn reversed_flips_direction() {
        assert_eq!(QuizMode::FrontToBack.reversed(), QuizMode::BackToFront);
        assert_eq!(QuizMode::BackToFront.reversed(), QuizMode::FrontToBack);
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&QuizMode::BackToFront).unwrap();
        assert_eq!(json, "\"back-to-front\"");
    }
}
