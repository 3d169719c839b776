//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use vocab_core::model::{PoolError, SessionResultError};

/// Errors emitted by quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no words available for a quiz session")]
    EmptyPool,
    #[error("invalid word pool: {0}")]
    InvalidPool(#[source] PoolError),
    #[error("failed to fetch word pool: {0}")]
    PoolFetch(#[source] StorageError),
    #[error("session is not finished")]
    NotFinished,
    #[error(transparent)]
    Summary(#[from] SessionResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<PoolError> for SessionError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Empty => SessionError::EmptyPool,
            other => SessionError::InvalidPool(other),
        }
    }
}
