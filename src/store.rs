//! Tournament store: where tournament documents live between requests.
//!
//! Readers always get a fresh copy (no caching in the engine). Writers go
//! through closures applied under the store's lock, so a score update or a
//! stat increment never races a concurrent writer on the same tournament.

use crate::logic;
use crate::models::{StatCategory, Sport, Tournament, TournamentError, TournamentId, TournamentType};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Short listing entry for choosing a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    pub sport: Sport,
}

impl TournamentSummary {
    fn of(t: &Tournament) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            kind: t.kind,
            sport: t.sport,
        }
    }
}

/// Closure applied to a tournament inside a store transaction.
pub type Mutation<'a> = &'a mut dyn FnMut(&mut Tournament) -> Result<(), TournamentError>;

/// Persistence boundary for tournaments.
pub trait TournamentStore {
    /// Store a new tournament and return its id.
    fn create(&self, tournament: Tournament) -> Result<TournamentId, TournamentError>;

    /// Current copy of a tournament.
    fn get(&self, id: TournamentId) -> Result<Tournament, TournamentError>;

    fn list(&self) -> Result<Vec<TournamentSummary>, TournamentError>;

    fn delete(&self, id: TournamentId) -> Result<(), TournamentError>;

    /// Apply `mutation` atomically. With `expected_version`, fail with
    /// `VersionConflict` if the tournament changed since that version was read.
    /// On error nothing is written.
    fn update(
        &self,
        id: TournamentId,
        expected_version: Option<u64>,
        mutation: Mutation<'_>,
    ) -> Result<Tournament, TournamentError>;

    /// Targeted update of one match's scores.
    fn set_score(
        &self,
        id: TournamentId,
        index: usize,
        score1: Option<u32>,
        score2: Option<u32>,
    ) -> Result<Tournament, TournamentError> {
        self.update(id, None, &mut |t| logic::set_score(t, index, score1, score2))
    }

    /// Atomic counter increment; returns the new count.
    fn increment_stat(
        &self,
        id: TournamentId,
        category: StatCategory,
        player: &str,
        amount: u32,
    ) -> Result<u32, TournamentError> {
        let mut count = 0;
        self.update(id, None, &mut |t| {
            count = logic::increment_stat(t, category, player, amount)?;
            Ok(())
        })?;
        Ok(count)
    }
}

/// Per-tournament entry: tournament data + last activity time (for eviction).
struct Entry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory store: tournaments by id behind one lock.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<TournamentId, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tournaments.
    pub fn len(&self) -> Result<usize, TournamentError> {
        self.entries
            .read()
            .map(|g| g.len())
            .map_err(|_| TournamentError::StoreUnavailable)
    }

    pub fn is_empty(&self) -> Result<bool, TournamentError> {
        self.len().map(|n| n == 0)
    }

    /// Remove tournaments not touched for `ttl`. Returns how many were removed.
    pub fn evict_inactive(&self, ttl: Duration) -> Result<usize, TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < ttl);
        let removed = before - g.len();
        if removed > 0 {
            log::info!("Evicted {} inactive tournament(s)", removed);
        }
        Ok(removed)
    }
}

impl TournamentStore for MemoryStore {
    fn create(&self, tournament: Tournament) -> Result<TournamentId, TournamentError> {
        let id = tournament.id;
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        log::info!("Created tournament {} ({})", tournament.name, id);
        g.insert(
            id,
            Entry {
                tournament,
                last_activity: Instant::now(),
            },
        );
        Ok(id)
    }

    fn get(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        // Write lock: reading refreshes last_activity.
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let entry = g.get_mut(&id).ok_or(TournamentError::TournamentNotFound(id))?;
        entry.last_activity = Instant::now();
        Ok(entry.tournament.clone())
    }

    fn list(&self) -> Result<Vec<TournamentSummary>, TournamentError> {
        let g = self
            .entries
            .read()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let mut list: Vec<TournamentSummary> = g
            .values()
            .map(|e| TournamentSummary::of(&e.tournament))
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    fn delete(&self, id: TournamentId) -> Result<(), TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        g.remove(&id).ok_or(TournamentError::TournamentNotFound(id))?;
        log::info!("Deleted tournament {}", id);
        Ok(())
    }

    fn update(
        &self,
        id: TournamentId,
        expected_version: Option<u64>,
        mutation: Mutation<'_>,
    ) -> Result<Tournament, TournamentError> {
        let mut g = self
            .entries
            .write()
            .map_err(|_| TournamentError::StoreUnavailable)?;
        let entry = g.get_mut(&id).ok_or(TournamentError::TournamentNotFound(id))?;
        entry.last_activity = Instant::now();

        let actual = entry.tournament.version;
        if let Some(expected) = expected_version {
            if expected != actual {
                log::warn!(
                    "Version conflict on tournament {}: expected {}, found {}",
                    id,
                    expected,
                    actual
                );
                return Err(TournamentError::VersionConflict { expected, actual });
            }
        }

        // Work on a copy so a failing mutation leaves the stored document untouched.
        let mut draft = entry.tournament.clone();
        mutation(&mut draft)?;
        draft.version = actual + 1;
        entry.tournament = draft;
        log::debug!("Tournament {} updated to version {}", id, actual + 1);
        Ok(entry.tournament.clone())
    }
}
