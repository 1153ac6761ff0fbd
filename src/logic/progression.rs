//! Round progression: record winners, build the next round, detect the champion.

use crate::logic::generator::pair_slots;
use crate::models::{
    EntrantId, MatchId, MatchStatus, Tournament, TournamentError, TournamentStatus,
};

/// What `advance_round` did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundAdvance {
    /// A new round was created with this number and match count.
    NextRound { round: u32, matches: usize },
    /// One winner remained; the tournament is completed.
    Champion(EntrantId),
}

/// Set or clear the winner of a contested match in the current round.
///
/// `winner = Some(id)` requires `id` to be one of the two slots and sets status Final;
/// `None` clears the result back to Scheduled. Byes are rejected.
pub fn record_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: Option<EntrantId>,
) -> Result<(), TournamentError> {
    if tournament.is_completed() {
        return Err(TournamentError::AlreadyCompleted);
    }
    let current = tournament.current_round();
    let m = tournament
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.round != current {
        return Err(TournamentError::MatchNotInCurrentRound(match_id));
    }
    if !m.is_contest() {
        return Err(TournamentError::MatchIsBye(match_id));
    }
    match winner {
        Some(w) if !m.contains(w) => {
            return Err(TournamentError::WinnerNotInMatch { match_id, winner: w });
        }
        Some(w) => {
            m.winner = Some(w);
            m.status = MatchStatus::Final;
        }
        None => {
            m.winner = None;
            m.status = MatchStatus::Scheduled;
        }
    }
    Ok(())
}

/// Winners of the current round in match order, or an error naming how many are still open.
fn current_round_winners(tournament: &Tournament) -> Result<Vec<EntrantId>, TournamentError> {
    let round = tournament.current_round();
    let mut winners = Vec::new();
    let mut undecided = 0;
    for m in tournament.round_matches(round) {
        match m.winner {
            Some(w) => winners.push(w),
            None => undecided += 1,
        }
    }
    if round == 0 || undecided > 0 || winners.is_empty() {
        return Err(TournamentError::RoundNotDecided { round, undecided });
    }
    Ok(winners)
}

/// Close the current round.
///
/// Requires every match of the latest round to have a winner (byes already do). With a single
/// winner left the tournament becomes Completed with that champion; otherwise the winners are paired
/// in match order into round `current + 1`, an odd last winner getting a bye.
/// On error nothing changes.
pub fn advance_round(tournament: &mut Tournament) -> Result<RoundAdvance, TournamentError> {
    if tournament.is_completed() {
        return Err(TournamentError::AlreadyCompleted);
    }
    let winners = current_round_winners(tournament)?;

    if let [champion] = winners.as_slice() {
        let champion = *champion;
        tournament.status = TournamentStatus::Completed;
        tournament.champion = Some(champion);
        log::info!(
            "Tournament '{}' completed, champion: {}",
            tournament.name,
            tournament.entrant_name(champion).unwrap_or("?")
        );
        return Ok(RoundAdvance::Champion(champion));
    }

    let round = tournament.current_round() + 1;
    let slots: Vec<Option<EntrantId>> = winners.into_iter().map(Some).collect();
    let next = pair_slots(round, &slots);
    let count = next.len();
    tournament.matches.extend(next);
    log::debug!("Tournament '{}': round {} created with {} match(es)", tournament.name, round, count);
    Ok(RoundAdvance::NextRound {
        round,
        matches: count,
    })
}
