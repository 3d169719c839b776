use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{MistakeRecord, QuizMode};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionResultError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many mistakes for a single session: {len}")]
    TooManyMistakes { len: usize },

    #[error("total answered ({total}) does not match correct + mistakes ({sum})")]
    CountMismatch { total: u32, sum: u32 },
}

/// Final outcome of a finished quiz session, as handed to the result sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    mode: QuizMode,
    correct_count: u32,
    total_answered: u32,
    mistakes: Vec<MistakeRecord>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl SessionResult {
    /// Build a result and check that the counters agree with the mistake log.
    ///
    /// # Errors
    ///
    /// Returns `SessionResultError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SessionResultError::TooManyMistakes` if the mistake count cannot fit in `u32`.
    /// Returns `SessionResultError::CountMismatch` if `total_answered != correct_count + mistakes`.
    pub fn new(
        mode: QuizMode,
        correct_count: u32,
        total_answered: u32,
        mistakes: Vec<MistakeRecord>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionResultError> {
        if completed_at < started_at {
            return Err(SessionResultError::InvalidTimeRange);
        }
        let wrong = u32::try_from(mistakes.len())
            .map_err(|_| SessionResultError::TooManyMistakes { len: mistakes.len() })?;
        let sum = correct_count.saturating_add(wrong);
        if sum != total_answered {
            return Err(SessionResultError::CountMismatch {
                total: total_answered,
                sum,
            });
        }

        Ok(Self {
            mode,
            correct_count,
            total_answered,
            mistakes,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
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
    pub fn wrong_count(&self) -> u32 {
        self.total_answered - self.correct_count
    }

    #[must_use]
    pub fn mistakes(&self) -> &[MistakeRecord] {
        &self.mistakes
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Share of correct answers, rounded to the nearest whole percent.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct_count, self.total_answered)
    }
}

/// `round(100 * correct / total)`, or 0 when nothing was answered.
#[must_use]
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = u64::from(correct) * 100;
    let total = u64::from(total);
    // round half up
    let rounded = (scaled * 2 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(100)
}
