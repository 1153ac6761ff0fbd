//! Match record: two slots, an optional winner and a status.

use crate::models::entrant::EntrantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Where a match stands.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Both slots filled, no winner yet.
    #[default]
    Scheduled,
    /// Exactly one slot filled; that side advances without play.
    Bye,
    /// Both slots filled and a winner recorded.
    Final,
}

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// A single pairing in one round of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    /// 1-based round number.
    pub round: u32,
    pub slot_a: Option<EntrantId>,
    pub slot_b: Option<EntrantId>,
    /// None until decided. Always equal to `slot_a` or `slot_b` when set.
    pub winner: Option<EntrantId>,
    pub status: MatchStatus,
}

impl BracketMatch {
    /// Build a pairing for `round`. Returns None when both sides are empty (never materialized).
    /// A one-sided pairing becomes a Bye with its winner pre-set to the occupied side.
    pub fn pairing(round: u32, slot_a: Option<EntrantId>, slot_b: Option<EntrantId>) -> Option<Self> {
        let (status, winner) = match (slot_a, slot_b) {
            (None, None) => return None,
            (Some(_), Some(_)) => (MatchStatus::Scheduled, None),
            (a, b) => (MatchStatus::Bye, a.or(b)),
        };
        Some(Self {
            id: Uuid::new_v4(),
            round,
            slot_a,
            slot_b,
            winner,
            status,
        })
    }

    /// True when exactly one side is occupied.
    pub fn is_bye(&self) -> bool {
        self.slot_a.is_some() != self.slot_b.is_some()
    }

    /// True when both sides are occupied.
    pub fn is_contest(&self) -> bool {
        self.slot_a.is_some() && self.slot_b.is_some()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether `entrant` sits in either slot.
    pub fn contains(&self, entrant: EntrantId) -> bool {
        self.slot_a == Some(entrant) || self.slot_b == Some(entrant)
    }

    pub fn slot(&self, side: Side) -> Option<EntrantId> {
        match side {
            Side::A => self.slot_a,
            Side::B => self.slot_b,
        }
    }

    /// Open sides in A-then-B order.
    pub fn open_sides(&self) -> Vec<Side> {
        [Side::A, Side::B]
            .into_iter()
            .filter(|&s| self.slot(s).is_none())
            .collect()
    }

    /// Put `entrant` into an open side. Once both sides are filled the match becomes Scheduled
    /// and any bye winner is cleared.
    pub(crate) fn fill(&mut self, side: Side, entrant: EntrantId) {
        match side {
            Side::A => self.slot_a = Some(entrant),
            Side::B => self.slot_b = Some(entrant),
        }
        if self.is_contest() {
            self.status = MatchStatus::Scheduled;
            self.winner = None;
        }
    }
}
