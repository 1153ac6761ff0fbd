//! Data structures for the bracket: entrants, matches, tournament record, repository.

mod bracket_match;
mod entrant;
mod repository;
mod tournament;

pub use bracket_match::{BracketMatch, MatchId, MatchStatus, Side};
pub use entrant::{Entrant, EntrantId};
pub use repository::{Snapshot, TournamentRepository};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
