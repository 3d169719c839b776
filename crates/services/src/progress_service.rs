use chrono::{DateTime, Utc};
use std::sync::Arc;

use storage::repository::{QuizHistoryRepository, QuizHistoryRow, Storage, UserProgressRepository};
use vocab_core::model::{QuizMode, UserId, UserProgress};

use crate::error::SessionError;

/// Presentation-agnostic list item for a stored quiz result.
///
/// No pre-formatted strings; the caller formats timestamps and percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizHistoryListItem {
    pub id: i64,
    pub completed_at: DateTime<Utc>,
    pub mode: QuizMode,
    pub score: u32,
    pub total: u32,
    pub accuracy_percent: u32,
    pub mistakes: usize,
}

impl QuizHistoryListItem {
    #[must_use]
    pub fn from_row(row: &QuizHistoryRow) -> Self {
        let result = &row.result;
        Self {
            id: row.id,
            completed_at: result.completed_at(),
            mode: result.mode(),
            score: result.correct_count(),
            total: result.total_answered(),
            accuracy_percent: result.accuracy_percent(),
            mistakes: result.mistakes().len(),
        }
    }
}

/// Read side of submitted results: lifetime totals and recent history.
#[derive(Clone)]
pub struct ProgressService {
    history: Arc<dyn QuizHistoryRepository>,
    progress: Arc<dyn UserProgressRepository>,
}

impl ProgressService {
    pub const DEFAULT_RECENT_LIMIT: u32 = 10;

    #[must_use]
    pub fn new(
        history: Arc<dyn QuizHistoryRepository>,
        progress: Arc<dyn UserProgressRepository>,
    ) -> Self {
        Self { history, progress }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.history), Arc::clone(&storage.progress))
    }

    /// Lifetime totals for `user_id`, or `None` before their first game.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn progress(&self, user_id: UserId) -> Result<Option<UserProgress>, SessionError> {
        Ok(self.progress.get_progress(user_id).await?)
    }

    /// Most recent results for `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn recent(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<QuizHistoryListItem>, SessionError> {
        let rows = self.history.recent_results(user_id, limit).await?;
        Ok(rows.iter().map(QuizHistoryListItem::from_row).collect())
    }
}
