use sqlx::Row;
use vocab_core::model::{
    MistakeRecord, QuizMode, SessionResult, UserId, UserProgress, WordEntry, WordId,
};

use crate::repository::{QuizHistoryRow, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn word_id_to_i64(id: WordId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("word_id overflow".into()))
}

pub(crate) fn word_id_from_i64(v: i64) -> Result<WordId, StorageError> {
    u64::try_from(v)
        .map(WordId::new)
        .map_err(|_| StorageError::Serialization("word_id sign overflow".into()))
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_word_row(row: &sqlx::sqlite::SqliteRow) -> Result<WordEntry, StorageError> {
    WordEntry::new(
        word_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("front").map_err(ser)?,
        row.try_get::<String, _>("back").map_err(ser)?,
    )
    .map_err(ser)
}

/// Mistakes are stored as a JSON array in `quiz_history.wrong_answers`.
pub(crate) fn encode_mistakes(mistakes: &[MistakeRecord]) -> Result<String, StorageError> {
    serde_json::to_string(mistakes).map_err(ser)
}

pub(crate) fn decode_mistakes(raw: &str) -> Result<Vec<MistakeRecord>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_history_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<QuizHistoryRow, StorageError> {
    let user_id: UserId = row
        .try_get::<String, _>("user_id")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let mode: QuizMode = row
        .try_get::<String, _>("mode")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let total = u32_from_i64(
        "total_questions",
        row.try_get::<i64, _>("total_questions").map_err(ser)?,
    )?;
    let mistakes = decode_mistakes(&row.try_get::<String, _>("wrong_answers").map_err(ser)?)?;

    let result = SessionResult::new(
        mode,
        score,
        total,
        mistakes,
        row.try_get("started_at").map_err(ser)?,
        row.try_get("completed_at").map_err(ser)?,
    )
    .map_err(ser)?;

    Ok(QuizHistoryRow {
        id: row.try_get("id").map_err(ser)?,
        user_id,
        result,
    })
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<UserProgress, StorageError> {
    let user_id: UserId = row
        .try_get::<String, _>("user_id")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    Ok(UserProgress::from_persisted(
        user_id,
        u32_from_i64("total_games", row.try_get::<i64, _>("total_games").map_err(ser)?)?,
        u32_from_i64("total_score", row.try_get::<i64, _>("total_score").map_err(ser)?)?,
        row.try_get("updated_at").map_err(ser)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mistakes_survive_json_encoding() {
        let mistakes = vec![MistakeRecord::new(
            "Goodbye",
            "Salom",
            "Xayr",
            QuizMode::FrontToBack,
        )];
        let raw = encode_mistakes(&mistakes).unwrap();
        assert!(raw.contains("\"front-to-back\""));
        assert_eq!(decode_mistakes(&raw).unwrap(), mistakes);
    }

    #[test]
    fn negative_word_id_is_rejected() {
        assert!(matches!(
            word_id_from_i64(-1),
            Err(StorageError::Serialization(_))
        ));
    }
}
