use vocab_core::model::{WordEntry, WordId};

use crate::repository::{StorageError, WordRepository};

/// Starter word list: English front, Uzbek back.
pub const DEFAULT_WORDS: [(&str, &str); 10] = [
    ("Hello", "Salom"),
    ("Thank you", "Rahmat"),
    ("Goodbye", "Xayr"),
    ("Please", "Iltimos"),
    ("Yes", "Ha"),
    ("No", "Yo'q"),
    ("Water", "Suv"),
    ("Food", "Ovqat"),
    ("House", "Uy"),
    ("Car", "Mashina"),
];

/// Upsert the starter words under ids `1..=10`.
///
/// Re-running overwrites the same rows, so the store never holds a starter
/// pair twice.
///
/// # Errors
///
/// Returns `StorageError` if a word cannot be stored.
pub async fn seed_default_words(words: &dyn WordRepository) -> Result<usize, StorageError> {
    for (id, (front, back)) in (1_u64..).zip(DEFAULT_WORDS) {
        let entry = WordEntry::new(WordId::new(id), front, back)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        words.upsert_word(&entry).await?;
        tracing::debug!(%id, front, back, "seeded word");
    }
    Ok(DEFAULT_WORDS.len())
}
