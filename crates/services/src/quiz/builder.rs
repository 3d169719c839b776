use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use vocab_core::model::{Question, QuizMode, QuizSettings, WordId, WordPool};

/// Builds one question from a pool: picks an unused word, draws distractors
/// from the other entries, and shuffles the options.
pub struct QuestionBuilder<'a> {
    pool: &'a WordPool,
    mode: QuizMode,
    distractor_count: usize,
}

impl<'a> QuestionBuilder<'a> {
    #[must_use]
    pub fn new(pool: &'a WordPool, mode: QuizMode) -> Self {
        Self {
            pool,
            mode,
            distractor_count: QuizSettings::DEFAULT_DISTRACTOR_COUNT as usize,
        }
    }

    #[must_use]
    pub fn with_distractor_count(mut self, count: usize) -> Self {
        self.distractor_count = count;
        self
    }

    /// Build a question for a word not in `used`.
    ///
    /// Returns `None` when every word in the pool has been used. The caller is
    /// responsible for recording the chosen word as used.
    pub fn build<R: Rng + ?Sized>(
        self,
        used: &HashSet<WordId>,
        rng: &mut R,
    ) -> Option<Question> {
        let word = self.pool.pick_random_unused(used, rng)?.clone();
        let correct = word.answer_for(self.mode);

        let mut excluded = HashSet::from([word.id()]);
        let mut distractors: Vec<String> = Vec::with_capacity(self.distractor_count);

        // Redraw while values collide with the answer or each other, until the pool runs dry.
        while distractors.len() < self.distractor_count {
            let missing = self.distractor_count - distractors.len();
            let batch = self.pool.sample_excluding(&excluded, missing, rng);
            if batch.is_empty() {
                break;
            }
            for entry in batch {
                excluded.insert(entry.id());
                let candidate = entry.answer_for(self.mode);
                if candidate != correct && !distractors.iter().any(|d| d == candidate) {
                    distractors.push(candidate.to_owned());
                }
            }
        }

        if distractors.len() < self.distractor_count {
            debug!(
                word_id = %word.id(),
                wanted = self.distractor_count,
                got = distractors.len(),
                "short distractor set"
            );
        }

        Some(Question::new(word, self.mode, distractors).shuffled(rng))
    }
}
