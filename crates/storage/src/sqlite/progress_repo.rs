use vocab_core::model::{UserId, UserProgress};

use super::SqliteRepository;
use super::mapping::map_progress_row;
use crate::repository::{StorageError, UserProgressRepository};

#[async_trait::async_trait]
impl UserProgressRepository for SqliteRepository {
    async fn get_progress(&self, user_id: UserId) -> Result<Option<UserProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, total_games, total_score, updated_at
            FROM user_progress
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }
}
