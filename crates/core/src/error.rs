use thiserror::Error;

use crate::model::{PoolError, SessionResultError, SettingsError, WordError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    SessionResult(#[from] SessionResultError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuizSettings, WordEntry, WordId, WordPool};

    fn load_blank() -> Result<WordPool, Error> {
        let word = WordEntry::new(WordId::new(1), "Hello", "  ")?;
        Ok(WordPool::load([word])?)
    }

    #[test]
    fn module_errors_convert_with_question_mark() {
        let err = load_blank().unwrap_err();
        assert!(matches!(err, Error::Word(WordError::EmptyBack)));

        let err: Error = QuizSettings::new(0, 3, 50).unwrap_err().into();
        assert_eq!(err.to_string(), "max questions must be > 0");

        let err: Error = WordPool::load(Vec::new()).unwrap_err().into();
        assert!(matches!(err, Error::Pool(PoolError::Empty)));
    }
}
