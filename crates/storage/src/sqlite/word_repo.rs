use sqlx::Row;
use vocab_core::model::{WordEntry, WordId};

use super::SqliteRepository;
use super::mapping::{map_word_row, ser, word_id_from_i64, word_id_to_i64};
use crate::repository::{NewWordRecord, StorageError, WordRepository};

#[async_trait::async_trait]
impl WordRepository for SqliteRepository {
    async fn insert_new_word(&self, word: NewWordRecord) -> Result<WordId, StorageError> {
        let front = word.front.trim().to_owned();
        let back = word.back.trim().to_owned();
        if front.is_empty() || back.is_empty() {
            return Err(StorageError::Serialization("word text cannot be empty".into()));
        }

        let res = sqlx::query(
            r"
            INSERT INTO words (front, back, category, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(front)
        .bind(back)
        .bind(word.category)
        .bind(word.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        word_id_from_i64(res.last_insert_rowid())
    }

    async fn upsert_word(&self, word: &WordEntry) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO words (id, front, back, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                front = excluded.front,
                back = excluded.back
            ",
        )
        .bind(word_id_to_i64(word.id())?)
        .bind(word.front())
        .bind(word.back())
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_words(&self, limit: u32) -> Result<Vec<WordEntry>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, front, back
            FROM words
            ORDER BY id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut words = Vec::with_capacity(rows.len());
        for row in rows {
            words.push(map_word_row(&row)?);
        }
        Ok(words)
    }

    async fn count_words(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM words")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(ser)
    }
}
