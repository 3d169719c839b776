use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

use vocab_core::Clock;
use vocab_core::model::{
    MistakeRecord, Question, QuizMode, QuizSettings, SessionResult, WordId, WordPool,
    accuracy_percent,
};

use super::builder::QuestionBuilder;
use super::progress::QuizProgress;
use crate::error::SessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Judgement of a confirmed answer, kept for feedback until the next question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub choice: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Where the session stands. Each variant carries exactly the data that is
/// meaningful in that phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    /// A question is shown and no option is picked yet.
    AwaitingSelection { question: Question },
    /// An option is tentatively picked and may still be cancelled.
    AwaitingConfirmation { question: Question, choice: String },
    /// The answer was judged; feedback is visible.
    Answered {
        question: Question,
        feedback: AnswerFeedback,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhaseKind {
    AwaitingSelection,
    AwaitingConfirmation,
    Answered,
    Finished,
}

impl QuizPhase {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            QuizPhase::AwaitingSelection { .. } => PhaseKind::AwaitingSelection,
            QuizPhase::AwaitingConfirmation { .. } => PhaseKind::AwaitingConfirmation,
            QuizPhase::Answered { .. } => PhaseKind::Answered,
            QuizPhase::Finished => PhaseKind::Finished,
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        match self {
            QuizPhase::AwaitingSelection { question }
            | QuizPhase::AwaitingConfirmation { question, .. }
            | QuizPhase::Answered { question, .. } => Some(question),
            QuizPhase::Finished => None,
        }
    }
}

/// Outcome of `QuizSession::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Not in the `Answered` phase; nothing changed.
    Ignored,
    NextQuestion,
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a fixed word pool.
///
/// Every command is defined in every phase; commands that do not apply are
/// ignored and leave the state untouched. Score and mistakes change only in
/// `confirm_answer`.
pub struct QuizSession {
    pool: WordPool,
    settings: QuizSettings,
    clock: Clock,
    rng: StdRng,
    mode: QuizMode,
    used_word_ids: HashSet<WordId>,
    correct_count: u32,
    total_answered: u32,
    mistakes: Vec<MistakeRecord>,
    phase: QuizPhase,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    result_id: Option<i64>,
}

impl QuizSession {
    /// Start a session with default settings, the system clock, and OS entropy.
    #[must_use]
    pub fn start(mode: QuizMode, pool: WordPool) -> Self {
        Self::start_with(
            mode,
            pool,
            QuizSettings::default(),
            Clock::default(),
            StdRng::from_os_rng(),
        )
    }

    /// Start a session with explicit settings, clock, and RNG.
    ///
    /// A seeded `rng` makes the whole question sequence reproducible.
    #[must_use]
    pub fn start_with(
        mode: QuizMode,
        pool: WordPool,
        settings: QuizSettings,
        clock: Clock,
        rng: StdRng,
    ) -> Self {
        let started_at = clock.now();
        let mut session = Self {
            pool,
            settings,
            clock,
            rng,
            mode,
            used_word_ids: HashSet::new(),
            correct_count: 0,
            total_answered: 0,
            mistakes: Vec::new(),
            phase: QuizPhase::Finished,
            started_at,
            completed_at: None,
            result_id: None,
        };
        session.generate_question();
        session
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.phase.question()
    }

    /// The option picked but not yet confirmed.
    #[must_use]
    pub fn tentative_choice(&self) -> Option<&str> {
        match &self.phase {
            QuizPhase::AwaitingConfirmation { choice, .. } => Some(choice),
            _ => None,
        }
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        match &self.phase {
            QuizPhase::Answered { feedback, .. } => Some(feedback),
            _ => None,
        }
    }

    #[must_use]
    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    #[must_use]
    pub fn max_questions(&self) -> u32 {
        self.settings.max_questions()
    }

    #[must_use]
    pub fn used_word_ids(&self) -> &HashSet<WordId> {
        &self.used_word_ids
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    #[must_use]
    pub fn mistakes(&self) -> &[MistakeRecord] {
        &self.mistakes
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, QuizPhase::Finished)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Storage id of the submitted result, once submission succeeded.
    #[must_use]
    pub fn result_id(&self) -> Option<i64> {
        self.result_id
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct_count, self.total_answered)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let question_number = match self.phase {
            QuizPhase::AwaitingSelection { .. } | QuizPhase::AwaitingConfirmation { .. } => {
                self.total_answered + 1
            }
            QuizPhase::Answered { .. } | QuizPhase::Finished => self.total_answered,
        };
        QuizProgress {
            question_number,
            max_questions: self.max_questions(),
            answered: self.total_answered,
            correct: self.correct_count,
            is_finished: self.is_finished(),
        }
    }

    /// Tentatively pick `option` for the current question.
    ///
    /// Only applies while awaiting a selection and only for a displayed
    /// option. Returns whether the state changed.
    pub fn select_option(&mut self, option: &str) -> bool {
        let mut changed = false;
        self.phase = match std::mem::replace(&mut self.phase, QuizPhase::Finished) {
            QuizPhase::AwaitingSelection { question } if question.has_option(option) => {
                changed = true;
                QuizPhase::AwaitingConfirmation {
                    question,
                    choice: option.to_owned(),
                }
            }
            other => other,
        };
        if !changed {
            debug!(phase = ?self.phase.kind(), option, "select ignored");
        }
        changed
    }

    /// Drop the tentative choice and go back to awaiting a selection.
    pub fn cancel_selection(&mut self) -> bool {
        let mut changed = false;
        self.phase = match std::mem::replace(&mut self.phase, QuizPhase::Finished) {
            QuizPhase::AwaitingConfirmation { question, .. } => {
                changed = true;
                QuizPhase::AwaitingSelection { question }
            }
            other => other,
        };
        changed
    }

    /// Judge the tentative choice and record the outcome.
    ///
    /// Returns `None` when there is no tentative choice to confirm.
    pub fn confirm_answer(&mut self) -> Option<AnswerFeedback> {
        match std::mem::replace(&mut self.phase, QuizPhase::Finished) {
            QuizPhase::AwaitingConfirmation { question, choice } => {
                let is_correct = question.is_correct(&choice);
                self.total_answered += 1;
                if is_correct {
                    self.correct_count += 1;
                } else {
                    self.mistakes.push(MistakeRecord::new(
                        question.prompt(),
                        choice.as_str(),
                        question.correct_answer(),
                        self.mode,
                    ));
                }

                let feedback = AnswerFeedback {
                    choice,
                    correct_answer: question.correct_answer().to_owned(),
                    is_correct,
                };
                debug!(
                    word_id = %question.word().id(),
                    is_correct,
                    answered = self.total_answered,
                    "answer confirmed"
                );
                self.phase = QuizPhase::Answered {
                    question,
                    feedback: feedback.clone(),
                };
                Some(feedback)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Move past an answered question: either to the next one or to `Finished`.
    pub fn advance(&mut self) -> Advance {
        if !matches!(self.phase, QuizPhase::Answered { .. }) {
            return Advance::Ignored;
        }

        if self.total_answered >= self.max_questions() {
            self.finish();
        } else {
            self.generate_question();
        }

        if self.is_finished() {
            Advance::Finished
        } else {
            Advance::NextQuestion
        }
    }

    /// Switch direction and start over. No-op when the mode is unchanged or
    /// the session is finished.
    pub fn change_mode(&mut self, mode: QuizMode) -> bool {
        if self.is_finished() || mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.reset();
        self.generate_question();
        true
    }

    /// Start over in the current mode, discarding score and mistakes.
    pub fn restart(&mut self) {
        self.reset();
        self.generate_question();
    }

    /// Summary of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` before the session reaches `Finished`.
    /// Returns `SessionError::Summary` if the counters are inconsistent.
    pub fn result(&self) -> Result<SessionResult, SessionError> {
        let completed_at = match (&self.phase, self.completed_at) {
            (QuizPhase::Finished, Some(at)) => at,
            _ => return Err(SessionError::NotFinished),
        };
        Ok(SessionResult::new(
            self.mode,
            self.correct_count,
            self.total_answered,
            self.mistakes.clone(),
            self.started_at,
            completed_at,
        )?)
    }

    pub(crate) fn set_result_id(&mut self, id: i64) {
        self.result_id = Some(id);
    }

    fn reset(&mut self) {
        self.used_word_ids.clear();
        self.correct_count = 0;
        self.total_answered = 0;
        self.mistakes.clear();
        self.started_at = self.clock.now();
        self.completed_at = None;
        self.result_id = None;
    }

    fn generate_question(&mut self) {
        if self.total_answered >= self.max_questions() {
            self.finish();
            return;
        }

        let built = QuestionBuilder::new(&self.pool, self.mode)
            .with_distractor_count(self.settings.distractor_count() as usize)
            .build(&self.used_word_ids, &mut self.rng);

        match built {
            Some(question) => {
                self.used_word_ids.insert(question.word().id());
                debug!(
                    word_id = %question.word().id(),
                    options = question.options().len(),
                    "question generated"
                );
                self.phase = QuizPhase::AwaitingSelection { question };
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.phase = QuizPhase::Finished;
        if self.completed_at.is_none() {
            self.completed_at = Some(self.clock.now());
            info!(
                mode = %self.mode,
                correct = self.correct_count,
                answered = self.total_answered,
                accuracy = self.accuracy_percent(),
                "quiz session finished"
            );
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("phase", &self.phase.kind())
            .field("pool_len", &self.pool.len())
            .field("used", &self.used_word_ids.len())
            .field("correct_count", &self.correct_count)
            .field("total_answered", &self.total_answered)
            .field("mistakes_len", &self.mistakes.len())
            .field("result_id", &self.result_id)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
