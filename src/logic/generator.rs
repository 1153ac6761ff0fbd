//! Bracket generation: tournament creation and Round 1 layout.

use crate::logic::registry::{register_entrants, unique_names};
use crate::logic::seeding::{bracket_size, place_seeds};
use crate::models::{
    BracketMatch, Entrant, EntrantId, Tournament, TournamentError, TournamentStatus,
};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Most seeds that get a fixed slot.
pub const MAX_SEEDS: usize = 4;

/// Create a tournament from raw entrant and seed names and lay out Round 1.
///
/// Entrant names are deduped (case-insensitive, first spelling wins). Seeds are deduped the same way,
/// must number at least 2 and must each name a registered entrant; only the first four are used.
/// Seed 1 and seed 2 are remembered as `seed_top` / `seed_bottom` for later entry merges.
pub fn create_tournament<R, S, T>(
    name: &str,
    entrant_names: &[S],
    seed_names: &[T],
    rng: &mut R,
) -> Result<Tournament, TournamentError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    let entrants = register_entrants(entrant_names);
    if entrants.len() < 2 {
        return Err(TournamentError::NotEnoughEntrants {
            found: entrants.len(),
        });
    }
    let seeds = resolve_seeds(&entrants, seed_names)?;

    let matches = generate_round_one(&entrants, &seeds, rng);
    let tournament = Tournament {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Utc::now(),
        entrants,
        matches,
        status: TournamentStatus::Active,
        seed_top: seeds.first().copied(),
        seed_bottom: seeds.get(1).copied(),
        extra_seeds: seeds.iter().skip(2).copied().collect(),
        champion: None,
        deleted_at: None,
    };
    log::info!(
        "Created tournament '{}' ({} entrants, {} seeds, {} round 1 matches)",
        tournament.name,
        tournament.entrants.len(),
        seeds.len(),
        tournament.matches.len()
    );
    Ok(tournament)
}

/// Seeds used when none are picked: the first four distinct entrant names.
pub fn default_seeds<S: AsRef<str>>(entrant_names: &[S]) -> Vec<String> {
    unique_names(entrant_names).into_iter().take(MAX_SEEDS).collect()
}

/// Map seed names to entrant ids in priority order (at most four).
fn resolve_seeds<T: AsRef<str>>(
    entrants: &[Entrant],
    seed_names: &[T],
) -> Result<Vec<EntrantId>, TournamentError> {
    let names = unique_names(seed_names);
    if names.len() < 2 {
        return Err(TournamentError::NotEnoughSeeds);
    }
    names
        .into_iter()
        .take(MAX_SEEDS)
        .map(|n| {
            entrants
                .iter()
                .find(|e| e.has_name(&n))
                .map(|e| e.id)
                .ok_or(TournamentError::SeedNotAnEntrant(n))
        })
        .collect()
}

/// Fill a power-of-two slot array: seeds at their fixed slots, everyone else shuffled into the
/// open slots alternating top half / bottom half.
pub fn layout_round_one<R: Rng + ?Sized>(
    entrants: &[Entrant],
    seeds: &[EntrantId],
    rng: &mut R,
) -> Vec<Option<EntrantId>> {
    let size = bracket_size(entrants.len());
    let mut slots = place_seeds(size, seeds);

    let mut others: Vec<EntrantId> = entrants
        .iter()
        .map(|e| e.id)
        .filter(|id| !seeds.contains(id))
        .collect();
    others.shuffle(rng);

    let half = size / 2;
    let top: Vec<usize> = (0..half).filter(|&i| slots[i].is_none()).collect();
    let bottom: Vec<usize> = (half..size).filter(|&i| slots[i].is_none()).collect();
    let mut order: Vec<usize> = Vec::with_capacity(top.len() + bottom.len());
    for i in 0..top.len().max(bottom.len()) {
        order.extend(top.get(i).copied());
        order.extend(bottom.get(i).copied());
    }

    for (pos, id) in order.into_iter().zip(others) {
        slots[pos] = Some(id);
    }
    slots
}

/// Pair consecutive slots `(0,1), (2,3), ...` into matches for `round`.
/// Fully empty pairs are skipped; one-sided pairs become pre-resolved byes.
pub fn pair_slots(round: u32, slots: &[Option<EntrantId>]) -> Vec<BracketMatch> {
    slots
        .chunks(2)
        .filter_map(|pair| BracketMatch::pairing(round, pair[0], pair.get(1).copied().flatten()))
        .collect()
}

/// Round 1 matches for `entrants` with the given seed ids.
pub fn generate_round_one<R: Rng + ?Sized>(
    entrants: &[Entrant],
    seeds: &[EntrantId],
    rng: &mut R,
) -> Vec<BracketMatch> {
    let slots = layout_round_one(entrants, seeds, rng);
    let matches = pair_slots(1, &slots);
    log::debug!(
        "Round 1 layout: size {}, {} open slot(s), {} match(es)",
        slots.len(),
        slots.iter().filter(|s| s.is_none()).count(),
        matches.len()
    );
    matches
}
