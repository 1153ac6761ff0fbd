//! In-memory collection of tournaments plus the soft-deleted ones.

use crate::models::tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Everything that gets persisted in one blob.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub deleted: Vec<Tournament>,
}

/// Tournaments owned by the caller, newest first. Deleted ones are kept aside, never erased.
#[derive(Clone, Debug, Default)]
pub struct TournamentRepository {
    tournaments: Vec<Tournament>,
    deleted: Vec<Tournament>,
}

impl TournamentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            tournaments: snapshot.tournaments,
            deleted: snapshot.deleted,
        }
    }

    /// Copy of the current state for saving.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tournaments: self.tournaments.clone(),
            deleted: self.deleted.clone(),
        }
    }

    /// Add a tournament at the front. Returns its id.
    pub fn insert(&mut self, tournament: Tournament) -> TournamentId {
        let id = tournament.id;
        self.tournaments.insert(0, tournament);
        id
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    /// Run `op` on one tournament; unknown ids give `TournamentNotFound`.
    pub fn with_tournament<T, F>(&mut self, id: TournamentId, op: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    {
        let t = self
            .get_mut(id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        op(t)
    }

    /// All live tournaments.
    pub fn all(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn active(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments
            .iter()
            .filter(|t| t.status == TournamentStatus::Active)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments
            .iter()
            .filter(|t| t.status == TournamentStatus::Completed)
    }

    pub fn deleted(&self) -> &[Tournament] {
        &self.deleted
    }

    /// Soft delete: stamp `deleted_at` and move the tournament to the front of the deleted list.
    pub fn delete(&mut self, id: TournamentId) -> Result<&Tournament, TournamentError> {
        let idx = self
            .tournaments
            .iter()
            .position(|t| t.id == id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        let mut t = self.tournaments.remove(idx);
        t.deleted_at = Some(Utc::now());
        log::info!("Moved tournament '{}' to deleted", t.name);
        self.deleted.insert(0, t);
        Ok(&self.deleted[0])
    }
}
