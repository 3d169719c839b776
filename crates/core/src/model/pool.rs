use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::WordId;
use crate::model::word::WordEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PoolError {
    #[error("word pool cannot be empty")]
    Empty,

    #[error("duplicate word id in pool: {0}")]
    DuplicateId(WordId),
}

/// Immutable snapshot of the words available to one quiz session.
///
/// Entries keep their load order, so every sampling primitive is reproducible
/// for a given RNG state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    entries: Vec<WordEntry>,
}

impl WordPool {
    /// Load a pool from a supplier-provided list.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Empty` if `entries` is empty.
    /// Returns `PoolError::DuplicateId` if two entries share an id.
    pub fn load(entries: impl IntoIterator<Item = WordEntry>) -> Result<Self, PoolError> {
        let entries: Vec<WordEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(PoolError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(PoolError::DuplicateId(entry.id()));
            }
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a loaded pool; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: WordId) -> bool {
        self.get(id).is_some()
    }

    /// Draw up to `count` distinct entries whose id is not in `excluded`.
    ///
    /// Selection is uniform and without replacement. When fewer than `count`
    /// entries are eligible, all of them are returned; a short result is valid.
    pub fn sample_excluding<R: Rng + ?Sized>(
        &self,
        excluded: &HashSet<WordId>,
        count: usize,
        rng: &mut R,
    ) -> Vec<&WordEntry> {
        let eligible = self.eligible(excluded);
        eligible.choose_multiple(rng, count).copied().collect()
    }

    /// Pick one entry not yet in `used`, uniformly at random.
    ///
    /// Returns `None` once every entry has been used.
    pub fn pick_random_unused<R: Rng + ?Sized>(
        &self,
        used: &HashSet<WordId>,
        rng: &mut R,
    ) -> Option<&WordEntry> {
        self.eligible(used).choose(rng).copied()
    }

    fn eligible(&self, excluded: &HashSet<WordId>) -> Vec<&WordEntry> {
        self.entries
            .iter()
            .filter(|entry| !excluded.contains(&entry.id()))
            .collect()
    }
}
