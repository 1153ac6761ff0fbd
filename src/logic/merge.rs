//! Late entries: add entrants to a bracket that is still at Round 1.

use crate::logic::generator::pair_slots;
use crate::logic::registry::new_names;
use crate::models::{BracketMatch, Entrant, EntrantId, Side, Tournament, TournamentError};

/// Result of merging late entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MergeOutcome {
    /// Newly registered entrants, in import order.
    pub added: Vec<EntrantId>,
    /// How many open Round 1 slots were filled.
    pub filled_slots: usize,
    /// How many Round 1 matches were created.
    pub new_matches: usize,
}

/// Add `names` to a tournament whose bracket has not gone past Round 1.
///
/// Names already registered (case-insensitive) are skipped. New entrants first fill open Round 1
/// slots in match order (side A before side B), then the rest are paired into new Round 1 matches.
/// When the seed #1 and seed #2 matches can both be found, they stay first and last and the new
/// matches are spread over the interior alternately from the front and the back; otherwise the new
/// matches are appended.
pub fn add_entries<S: AsRef<str>>(
    tournament: &mut Tournament,
    names: &[S],
) -> Result<MergeOutcome, TournamentError> {
    if tournament.is_completed() {
        return Err(TournamentError::AlreadyCompleted);
    }
    let current_round = tournament.current_round();
    if current_round > 1 {
        return Err(TournamentError::MergePastRoundOne { current_round });
    }

    let fresh: Vec<Entrant> = new_names(&tournament.entrants, names)
        .into_iter()
        .map(Entrant::new)
        .collect();
    if fresh.is_empty() {
        return Ok(MergeOutcome::default());
    }
    let added: Vec<EntrantId> = fresh.iter().map(|e| e.id).collect();

    let (mut round_one, later): (Vec<BracketMatch>, Vec<BracketMatch>) = tournament
        .matches
        .iter()
        .cloned()
        .partition(|m| m.round == 1);

    let targets: Vec<(usize, Side)> = round_one
        .iter()
        .enumerate()
        .flat_map(|(i, m)| m.open_sides().into_iter().map(move |s| (i, s)))
        .collect();
    let mut queue = added.iter().copied();
    let mut filled_slots = 0;
    for (i, side) in targets {
        match queue.next() {
            Some(id) => {
                round_one[i].fill(side, id);
                filled_slots += 1;
            }
            None => break,
        }
    }

    let leftover: Vec<Option<EntrantId>> = queue.map(Some).collect();
    let created = pair_slots(1, &leftover);
    let new_matches = created.len();

    let mut rebuilt = reassemble(
        round_one,
        created,
        tournament.seed_top,
        tournament.seed_bottom,
    );
    rebuilt.extend(later);

    tournament.entrants.extend(fresh);
    tournament.matches = rebuilt;
    log::info!(
        "Tournament '{}': merged {} entrant(s), {} slot(s) filled, {} new match(es)",
        tournament.name,
        added.len(),
        filled_slots,
        new_matches
    );
    Ok(MergeOutcome {
        added,
        filled_slots,
        new_matches,
    })
}

/// Rebuild the Round 1 list with `created` matches spread between the seed #1 and seed #2 matches.
fn reassemble(
    existing: Vec<BracketMatch>,
    created: Vec<BracketMatch>,
    seed_top: Option<EntrantId>,
    seed_bottom: Option<EntrantId>,
) -> Vec<BracketMatch> {
    let locate = |seed: Option<EntrantId>| {
        seed.and_then(|s| existing.iter().position(|m| m.contains(s)))
    };
    let (top_idx, bottom_idx) = match (locate(seed_top), locate(seed_bottom)) {
        // Both seeds in one match leaves no interior to spread into.
        (Some(t), Some(b)) if t != b => (t, b),
        _ => {
            let mut out = existing;
            out.extend(created);
            return out;
        }
    };

    let mut top = None;
    let mut bottom = None;
    let mut between = Vec::with_capacity(existing.len() + created.len());
    for (i, m) in existing.into_iter().enumerate() {
        if i == top_idx {
            top = Some(m);
        } else if i == bottom_idx {
            bottom = Some(m);
        } else {
            between.push(m);
        }
    }

    let (mut front, mut back) = (0, 0);
    for (i, m) in created.into_iter().enumerate() {
        if i % 2 == 0 {
            between.insert(front, m);
            front += 1;
        } else {
            between.insert(between.len() - back, m);
            back += 1;
        }
    }

    top.into_iter().chain(between).chain(bottom).collect()
}
