use serde::{Deserialize, Serialize};

use crate::model::mode::QuizMode;

/// A wrongly answered question, kept for the end-of-session review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeRecord {
    pub prompt: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub mode: QuizMode,
}

impl MistakeRecord {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
        mode: QuizMode,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            user_answer: user_answer.into(),
            correct_answer: correct_answer.into(),
            mode,
        }
    }
}
