use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, info, warn};

use storage::repository::{QuizHistoryRepository, Storage, WordRepository};
use vocab_core::model::{QuizMode, QuizSettings, WordPool};

use super::session::{Advance, QuizSession};
use crate::Clock;
use crate::error::SessionError;
use crate::identity::IdentityProvider;

/// Orchestrates session start against the word supplier and result
/// submission against the history sink.
///
/// The session itself never performs I/O; this service runs the fetch before
/// the first transition and the submission after the last one.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    words: Arc<dyn WordRepository>,
    history: Arc<dyn QuizHistoryRepository>,
    identity: Arc<dyn IdentityProvider>,
    seed: Option<u64>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        words: Arc<dyn WordRepository>,
        history: Arc<dyn QuizHistoryRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            words,
            history,
            identity,
            seed: None,
        }
    }

    #[must_use]
    pub fn from_storage(
        clock: Clock,
        storage: &Storage,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self::new(
            clock,
            Arc::clone(&storage.words),
            Arc::clone(&storage.history),
            identity,
        )
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed every session's RNG so question order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Fetch the word pool and start a session in `mode`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PoolFetch` if the supplier fails.
    /// Returns `SessionError::EmptyPool` if the supplier returns no words.
    pub async fn start_session(&self, mode: QuizMode) -> Result<QuizSession, SessionError> {
        let words = self
            .words
            .list_words(self.settings.pool_limit())
            .await
            .map_err(SessionError::PoolFetch)?;
        let pool = WordPool::load(words)?;
        debug!(pool_len = pool.len(), %mode, "word pool loaded");

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(QuizSession::start_with(mode, pool, self.settings, self.clock, rng))
    }

    /// Advance past an answered question and submit the result if the
    /// session just finished.
    ///
    /// A failed submission is logged and leaves the session `Finished`;
    /// `finalize_result` can retry it.
    pub async fn advance(&self, session: &mut QuizSession) -> Advance {
        let step = session.advance();
        if step == Advance::Finished {
            if let Err(err) = self.finalize_result(session).await {
                warn!(error = %err, "failed to submit quiz result");
            }
        }
        step
    }

    /// Submit the result of a finished session for the current user.
    ///
    /// Returns the stored id, or `None` for anonymous play. A session that was
    /// already submitted is not submitted again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` if the session is still running.
    /// Returns `SessionError::Storage` if the sink rejects the result.
    pub async fn finalize_result(
        &self,
        session: &mut QuizSession,
    ) -> Result<Option<i64>, SessionError> {
        if let Some(id) = session.result_id() {
            return Ok(Some(id));
        }

        let result = session.result()?;
        let Some(user_id) = self.identity.current_user_id().await else {
            debug!("anonymous session, result not submitted");
            return Ok(None);
        };

        let id = self.history.append_result(user_id, &result).await?;
        session.set_result_id(id);
        info!(
            result_id = id,
            %user_id,
            score = result.correct_count(),
            total = result.total_answered(),
            "quiz result submitted"
        );
        Ok(Some(id))
    }
}
