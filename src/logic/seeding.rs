//! Seed placement: fixed bracket slots for up to four seeds.

/// Smallest power of two that holds `entrants` (at least 1).
pub fn bracket_size(entrants: usize) -> usize {
    entrants.max(1).next_power_of_two()
}

/// Place seeds (priority order) into a slot array of length `size`.
///
/// Seed 1 takes the first slot and seed 2 the last, so they sit in opposite halves.
/// Seeds 3 and 4 anchor the inner edge of each half (`size/2 - 1` and `size/2`) and are
/// only placed when `size >= 4`. Anything past the fourth seed is ignored.
pub fn place_seeds<T: Clone>(size: usize, seeds: &[T]) -> Vec<Option<T>> {
    let mut slots = vec![None; size];
    if size == 0 {
        return slots;
    }
    let half = size / 2;
    for (rank, seed) in seeds.iter().take(4).enumerate() {
        let pos = match rank {
            0 => 0,
            1 => size - 1,
            2 if size >= 4 => half - 1,
            3 if size >= 4 => half,
            _ => continue,
        };
        slots[pos] = Some(seed.clone());
    }
    slots
}
