use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max questions must be > 0")]
    InvalidMaxQuestions,

    #[error("distractor count must be > 0")]
    InvalidDistractorCount,

    #[error("pool limit must be > 0")]
    InvalidPoolLimit,
}

/// Tunables for a quiz session.
///
/// Defaults:
/// - 10 questions per session
/// - 3 distractors per question (4 options shown)
/// - at most 50 words fetched for the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    max_questions: u32,
    distractor_count: u32,
    pool_limit: u32,
}

impl QuizSettings {
    pub const DEFAULT_MAX_QUESTIONS: u32 = 10;
    pub const DEFAULT_DISTRACTOR_COUNT: u32 = 3;
    pub const DEFAULT_POOL_LIMIT: u32 = 50;

    /// # Errors
    ///
    /// Returns `SettingsError` if any value is zero.
    pub fn new(
        max_questions: u32,
        distractor_count: u32,
        pool_limit: u32,
    ) -> Result<Self, SettingsError> {
        if max_questions == 0 {
            return Err(SettingsError::InvalidMaxQuestions);
        }
        if distractor_count == 0 {
            return Err(SettingsError::InvalidDistractorCount);
        }
        if pool_limit == 0 {
            return Err(SettingsError::InvalidPoolLimit);
        }
        Ok(Self {
            max_questions,
            distractor_count,
            pool_limit,
        })
    }

    #[must_use]
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    #[must_use]
    pub fn distractor_count(&self) -> u32 {
        self.distractor_count
    }

    #[must_use]
    pub fn pool_limit(&self) -> u32 {
        self.pool_limit
    }

    /// Return a copy with a different session length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidMaxQuestions` if `max_questions` is zero.
    pub fn with_max_questions(self, max_questions: u32) -> Result<Self, SettingsError> {
        Self::new(max_questions, self.distractor_count, self.pool_limit)
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_questions: Self::DEFAULT_MAX_QUESTIONS,
            distractor_count: Self::DEFAULT_DISTRACTOR_COUNT,
            pool_limit: Self::DEFAULT_POOL_LIMIT,
        }
    }
}
