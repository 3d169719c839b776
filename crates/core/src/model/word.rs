use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::WordId;
use crate::model::mode::QuizMode;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("front text cannot be empty")]
    EmptyFront,

    #[error("back text cannot be empty")]
    EmptyBack,
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// A bilingual word pair. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    id: WordId,
    front: String,
    back: String,
}

impl WordEntry {
    /// Build a word pair, trimming both sides.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyFront` or `WordError::EmptyBack` when a side is blank.
    pub fn new(
        id: WordId,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Result<Self, WordError> {
        let front = normalize(front.into()).ok_or(WordError::EmptyFront)?;
        let back = normalize(back.into()).ok_or(WordError::EmptyBack)?;
        Ok(Self { id, front, back })
    }

    #[must_use]
    pub fn id(&self) -> WordId {
        self.id
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    /// The side shown to the player under `mode`.
    #[must_use]
    pub fn prompt_for(&self, mode: QuizMode) -> &str {
        match mode {
            QuizMode::FrontToBack => &self.front,
            QuizMode::BackToFront => &self.back,
        }
    }

    /// The side the player must pick under `mode`.
    #[must_use]
    pub fn answer_for(&self, mode: QuizMode) -> &str {
        match mode {
            QuizMode::FrontToBack => &self.back,
            QuizMode::BackToFront => &self.front,
        }
    }
}

fn normalize(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_sides() {
        let err = WordEntry::new(WordId::new(1), "  ", "Salom").unwrap_err();
        assert_eq!(err, WordError::EmptyFront);

        let err = WordEntry::new(WordId::new(1), "Hello", "").unwrap_err();
        assert_eq!(err, WordError::EmptyBack);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let word = WordEntry::new(WordId::new(1), " Hello ", "Salom\n").unwrap();
        assert_eq!(word.front(), "Hello");
        assert_eq!(word.back(), "Salom");
    }

    #[test]
    fn mode_selects_prompt_and_answer() {
        let word = WordEntry::new(WordId::new(1), "Hello", "Salom").unwrap();
        assert_eq!(word.prompt_for(QuizMode::FrontToBack), "Hello");
        assert_eq!(word.answer_for(QuizMode::FrontToBack), "Salom");
        assert_eq!(word.prompt_for(QuizMode::BackToFront), "Salom");
        assert_eq!(word.answer_for(QuizMode::BackToFront), "Hello");
    }
}
