use chrono::{DateTime, Utc};

use crate::model::UserId;

/// Lifetime totals for one player across finished sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgress {
    user_id: UserId,
    total_games: u32,
    total_score: u32,
    updated_at: DateTime<Utc>,
}

impl UserProgress {
    /// Progress after a player's first finished game.
    #[must_use]
    pub fn first_game(user_id: UserId, score: u32, at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            total_games: 1,
            total_score: score,
            updated_at: at,
        }
    }

    /// Rehydrate progress from persisted storage.
    #[must_use]
    pub fn from_persisted(
        user_id: UserId,
        total_games: u32,
        total_score: u32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            total_games,
            total_score,
            updated_at,
        }
    }

    /// Fold one more finished game into the totals.
    pub fn record_game(&mut self, score: u32, at: DateTime<Utc>) {
        self.total_games = self.total_games.saturating_add(1);
        self.total_score = self.total_score.saturating_add(score);
        self.updated_at = at;
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn total_games(&self) -> u32 {
        self.total_games
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn record_game_accumulates() {
        let user = UserId::random();
        let mut progress = UserProgress::first_game(user, 7, fixed_now());
        let later = fixed_now() + chrono::Duration::minutes(5);
        progress.record_game(4, later);

        assert_eq!(progress.total_games(), 2);
        assert_eq!(progress.total_score(), 11);
        assert_eq!(progress.updated_at(), later);
        assert_eq!(progress.user_id(), user);
    }
}
