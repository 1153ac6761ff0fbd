//! Tournament, TournamentStatus and TournamentError.

use crate::models::bracket_match::{BracketMatch, MatchId};
use crate::models::entrant::{Entrant, EntrantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations. Any `Err` leaves the tournament unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament name is blank.
    EmptyName,
    /// Fewer than 2 entrants after dedupe.
    NotEnoughEntrants { found: usize },
    /// Fewer than 2 distinct seed names.
    NotEnoughSeeds,
    /// A seed name does not match any registered entrant.
    SeedNotAnEntrant(String),
    /// Import source had no usable entrants column or no names.
    NoEntrantsFound,
    /// No tournament with this id.
    TournamentNotFound(Uuid),
    /// No match with this id in the tournament.
    MatchNotFound(MatchId),
    /// Byes auto-advance; their winner cannot be changed.
    MatchIsBye(MatchId),
    /// Winner must be one of the two slots.
    WinnerNotInMatch { match_id: MatchId, winner: EntrantId },
    /// Results can only be recorded in the latest round.
    MatchNotInCurrentRound(MatchId),
    /// The current round still has undecided matches.
    RoundNotDecided { round: u32, undecided: usize },
    /// Entries can only be merged while the bracket is at Round 1.
    MergePastRoundOne { current_round: u32 },
    /// Tournament already has a champion.
    AlreadyCompleted,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyName => write!(f, "Please enter a tournament name"),
            TournamentError::NotEnoughEntrants { found } => {
                write!(f, "Need at least 2 entries (found {})", found)
            }
            TournamentError::NotEnoughSeeds => write!(f, "Pick at least 2 different seeds"),
            TournamentError::SeedNotAnEntrant(name) => {
                write!(f, "Seed '{}' is not one of the added entries", name)
            }
            TournamentError::NoEntrantsFound => write!(f, "No entrants found"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchIsBye(_) => write!(f, "Bye matches advance automatically"),
            TournamentError::WinnerNotInMatch { .. } => {
                write!(f, "Winner must be one of the two sides of the match")
            }
            TournamentError::MatchNotInCurrentRound(_) => {
                write!(f, "Only matches in the current round can be changed")
            }
            TournamentError::RoundNotDecided { round, undecided } => {
                write!(f, "Round {} still has {} undecided match(es)", round, undecided)
            }
            TournamentError::MergePastRoundOne { .. } => write!(
                f,
                "Cannot add entries after the tournament has advanced beyond Round 1"
            ),
            TournamentError::AlreadyCompleted => write!(f, "Tournament is already completed"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Rounds still being played.
    #[default]
    Active,
    /// A single winner remains; `champion` is set.
    Completed,
}

/// Full tournament record: entrants, every round's matches and seeding.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Registration order.
    pub entrants: Vec<Entrant>,
    /// All rounds, Round 1 first; within a round, bracket order.
    pub matches: Vec<BracketMatch>,
    pub status: TournamentStatus,
    /// Seed #1. Fixed at creation, used to keep its match first when merging late entries.
    pub seed_top: Option<EntrantId>,
    /// Seed #2. Fixed at creation, kept last when merging.
    pub seed_bottom: Option<EntrantId>,
    /// Seeds #3 and #4, if any.
    pub extra_seeds: Vec<EntrantId>,
    pub champion: Option<EntrantId>,
    /// Set when the tournament is moved to the deleted collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Look up an entrant by id.
    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    /// Display name for an entrant id; None if the id is unknown.
    pub fn entrant_name(&self, id: EntrantId) -> Option<&str> {
        self.entrant(id).map(|e| e.name.as_str())
    }

    /// Case-insensitive lookup by name.
    pub fn find_entrant_by_name(&self, name: &str) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.has_name(name))
    }

    /// Highest round number present (0 when there are no matches).
    pub fn current_round(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Matches of one round in bracket order.
    pub fn round_matches(&self, round: u32) -> impl Iterator<Item = &BracketMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TournamentStatus::Completed
    }
}
