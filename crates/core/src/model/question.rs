use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::mode::QuizMode;
use crate::model::word::WordEntry;

/// One multiple-choice question generated for a session.
///
/// `options` always holds `correct_answer` exactly once, followed (before
/// shuffling) by the distractors in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    word: WordEntry,
    mode: QuizMode,
    prompt: String,
    correct_answer: String,
    distractors: Vec<String>,
    options: Vec<String>,
}

impl Question {
    /// Build a question for `word` under `mode`.
    ///
    /// Distractors that repeat an earlier value or equal the correct answer are dropped.
    #[must_use]
    pub fn new(
        word: WordEntry,
        mode: QuizMode,
        distractors: impl IntoIterator<Item = String>,
    ) -> Self {
        let prompt = word.prompt_for(mode).to_owned();
        let correct_answer = word.answer_for(mode).to_owned();

        let mut kept: Vec<String> = Vec::new();
        for candidate in distractors {
            if candidate != correct_answer && !kept.contains(&candidate) {
                kept.push(candidate);
            }
        }

        let mut options = Vec::with_capacity(kept.len() + 1);
        options.push(correct_answer.clone());
        options.extend(kept.iter().cloned());

        Self {
            word,
            mode,
            prompt,
            correct_answer,
            distractors: kept,
            options,
        }
    }

    /// Put the display options in a uniformly random order (Fisher–Yates).
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.options.shuffle(rng);
        self
    }

    #[must_use]
    pub fn word(&self) -> &WordEntry {
        &self.word
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Exact string comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}
