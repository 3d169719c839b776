use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use vocab_core::model::{SessionResult, UserId, UserProgress, WordEntry, WordId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Input for creating a word when the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewWordRecord {
    pub front: String,
    pub back: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored session result together with its owner and row id.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizHistoryRow {
    pub id: i64,
    pub user_id: UserId,
    pub result: SessionResult,
}

/// Supplier of the word pool a session is built from.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Insert a word and let storage assign its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the text is blank, or other storage errors.
    async fn insert_new_word(&self, word: NewWordRecord) -> Result<WordId, StorageError>;

    /// Persist or update a word under its own id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the word cannot be stored.
    async fn upsert_word(&self, word: &WordEntry) -> Result<(), StorageError>;

    /// Fetch up to `limit` words ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the words cannot be read.
    async fn list_words(&self, limit: u32) -> Result<Vec<WordEntry>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the count cannot be read.
    async fn count_words(&self) -> Result<u64, StorageError>;
}

/// Sink for finished session results.
#[async_trait]
pub trait QuizHistoryRepository: Send + Sync {
    /// Store a finished session for `user_id` and fold it into the user's progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either write fails; neither is applied in that case.
    async fn append_result(
        &self,
        user_id: UserId,
        result: &SessionResult,
    ) -> Result<i64, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_result(&self, id: i64) -> Result<QuizHistoryRow, StorageError>;

    /// Latest results for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read.
    async fn recent_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<QuizHistoryRow>, StorageError>;
}

#[async_trait]
pub trait UserProgressRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if progress cannot be read.
    async fn get_progress(&self, user_id: UserId) -> Result<Option<UserProgress>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    words: Arc<Mutex<BTreeMap<WordId, WordEntry>>>,
    history: Arc<Mutex<Vec<QuizHistoryRow>>>,
    progress: Arc<Mutex<HashMap<UserId, UserProgress>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl WordRepository for InMemoryRepository {
    async fn insert_new_word(&self, word: NewWordRecord) -> Result<WordId, StorageError> {
        let mut guard = self.words.lock().map_err(poisoned)?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = WordId::new(next);
        let entry = WordEntry::new(id, word.front, word.back)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.insert(id, entry);
        Ok(id)
    }

    async fn upsert_word(&self, word: &WordEntry) -> Result<(), StorageError> {
        let mut guard = self.words.lock().map_err(poisoned)?;
        guard.insert(word.id(), word.clone());
        Ok(())
    }

    async fn list_words(&self, limit: u32) -> Result<Vec<WordEntry>, StorageError> {
        let guard = self.words.lock().map_err(poisoned)?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(guard.values().take(limit).cloned().collect())
    }

    async fn count_words(&self) -> Result<u64, StorageError> {
        let guard = self.words.lock().map_err(poisoned)?;
        Ok(guard.len() as u64)
    }
}

#[async_trait]
impl QuizHistoryRepository for InMemoryRepository {
    async fn append_result(
        &self,
        user_id: UserId,
        result: &SessionResult,
    ) -> Result<i64, StorageError> {
        let mut history = self.history.lock().map_err(poisoned)?;
        let mut progress = self.progress.lock().map_err(poisoned)?;

        let id = history.last().map_or(1, |row| row.id + 1);
        history.push(QuizHistoryRow {
            id,
            user_id,
            result: result.clone(),
        });

        let score = result.correct_count();
        let at = result.completed_at();
        progress
            .entry(user_id)
            .and_modify(|p| p.record_game(score, at))
            .or_insert_with(|| UserProgress::first_game(user_id, score, at));

        Ok(id)
    }

    async fn get_result(&self, id: i64) -> Result<QuizHistoryRow, StorageError> {
        let guard = self.history.lock().map_err(poisoned)?;
        guard
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn recent_results(
        &self,
        user_id: UserId,
        limit: u32,
    ) -> Result<Vec<QuizHistoryRow>, StorageError> {
        let guard = self.history.lock().map_err(poisoned)?;
        let mut rows: Vec<_> = guard
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.result
                .completed_at()
                .cmp(&a.result.completed_at())
                .then(b.id.cmp(&a.id))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

#[async_trait]
impl UserProgressRepository for InMemoryRepository {
    async fn get_progress(&self, user_id: UserId) -> Result<Option<UserProgress>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        Ok(guard.get(&user_id).cloned())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub words: Arc<dyn WordRepository>,
    pub history: Arc<dyn QuizHistoryRepository>,
    pub progress: Arc<dyn UserProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let words: Arc<dyn WordRepository> = Arc::new(repo.clone());
        let history: Arc<dyn QuizHistoryRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn UserProgressRepository> = Arc::new(repo);
        Self {
            words,
            history,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::model::{MistakeRecord, QuizMode};
    use vocab_core::time::fixed_now;

    fn word(id: u64, front: &str, back: &str) -> WordEntry {
        WordEntry::new(WordId::new(id), front, back).unwrap()
    }

    fn result(correct: u32, total: u32, minutes: i64) -> SessionResult {
        let mistakes = (correct..total)
            .map(|_| MistakeRecord::new("Goodbye", "Salom", "Xayr", QuizMode::FrontToBack))
            .collect();
        let at = fixed_now() + chrono::Duration::minutes(minutes);
        SessionResult::new(QuizMode::FrontToBack, correct, total, mistakes, at, at).unwrap()
    }

    #[tokio::test]
    async fn words_list_in_id_order_with_limit() {
        let repo = InMemoryRepository::new();
        repo.upsert_word(&word(3, "Goodbye", "Xayr")).await.unwrap();
        repo.upsert_word(&word(1, "Hello", "Salom")).await.unwrap();
        repo.upsert_word(&word(2, "Thank you", "Rahmat")).await.unwrap();

        let listed = repo.list_words(2).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|w| w.id().value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(repo.count_words().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_new_word_assigns_next_id_and_validates() {
        let repo = InMemoryRepository::new();
        repo.upsert_word(&word(4, "Please", "Iltimos")).await.unwrap();

        let id = repo
            .insert_new_word(NewWordRecord {
                front: "Yes".into(),
                back: "Ha".into(),
                category: None,
                created_at: fixed_now(),
            })
            .await
            .unwrap();
        assert_eq!(id, WordId::new(5));

        let err = repo
            .insert_new_word(NewWordRecord {
                front: " ".into(),
                back: "Ha".into(),
                category: None,
                created_at: fixed_now(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn append_result_updates_progress() {
        let repo = InMemoryRepository::new();
        let user = UserId::random();

        assert!(repo.get_progress(user).await.unwrap().is_none());
        repo.append_result(user, &result(7, 10, 0)).await.unwrap();
        repo.append_result(user, &result(4, 10, 5)).await.unwrap();

        let progress = repo.get_progress(user).await.unwrap().unwrap();
        assert_eq!(progress.total_games(), 2);
        assert_eq!(progress.total_score(), 11);
    }

    #[tokio::test]
    async fn recent_results_are_newest_first_per_user() {
        let repo = InMemoryRepository::new();
        let user = UserId::random();
        let other = UserId::random();

        let first = repo.append_result(user, &result(1, 2, 0)).await.unwrap();
        repo.append_result(other, &result(2, 2, 1)).await.unwrap();
        let second = repo.append_result(user, &result(2, 2, 2)).await.unwrap();

        let rows = repo.recent_results(user, 10).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second, first]);

        let fetched = repo.get_result(first).await.unwrap();
        assert_eq!(fetched.result.correct_count(), 1);
        assert_eq!(fetched.result.mistakes().len(), 1);
    }
}
