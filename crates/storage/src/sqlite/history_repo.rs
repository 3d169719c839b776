use vocab_core::model::{SessionResult, UserId};

use super::SqliteRepository;
use super::mapping::{encode_mistakes, map_history_row};
use crate::repository::{QuizHistoryRepository, QuizHistoryRow, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl QuizHistoryRepository for SqliteRepository {
    async fn append_result(
        &self,
        user_id: UserId,
        result: &SessionResult,
    ) -> Result<i64, StorageError> {
        let user = user_id.to_string();
        let wrong_answers = encode_mistakes(result.mistakes())?;
        let score = i64::from(result.correct_count());

        let mut tx = self.pool.begin().await.map_err(conn)?;

        let res = sqlx::query(
            r"
                INSERT INTO quiz_history (
                    user_id, mode, score, total_questions,
                    wrong_answers, started_at, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(user.as_str())
        .bind(result.mode().as_str())
        .bind(score)
        .bind(i64::from(result.total_answered()))
        .bind(wrong_answers)
        .bind(result.started_at())
        .bind(result.completed_at())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query(
            r"
                INSERT INTO user_progress (user_id, total_games, total_score, updated_at)
                VALUES (?1, 1, ?2, ?3)
                ON CONFLICT(user_id) DO UPDATE SET
                    total_games = user_progress.total_games + 1,
                    total_score = user_progress.total_score + excluded.total_score,
                    updated_at = excluded.updated_at
            ",
        )
        .bind(user.as_str())
        .bind(score)
        .bind(result.completed_at())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        tx.commit().await.map_err(conn)?;

        Ok(res.last_insert_rowid())
    }

    async fn get_result(&self, id: i64) -> Result<QuizHistoryRow, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    id, user_id, mode, score, total_questions,
                    wrong_answers, started_at, completed_at
                FROM quiz_history
                WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_history_row(&row)
    }

    async fn recent_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<QuizHistoryRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, user_id, mode, score, total_questions,
                    wrong_answers, started_at, completed_at
                FROM quiz_history
                WHERE user_id = ?1
                ORDER BY completed_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_history_row(&row)?);
        }
        Ok(out)
    }
}
