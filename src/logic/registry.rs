//! Entrant registry: dedupe raw names and hand out ids.

use crate::models::Entrant;
use std::collections::HashSet;

/// Trim, drop blanks and remove case-insensitive duplicates, keeping first-seen order and spelling.
pub fn unique_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in raw {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            out.push(name.to_string());
        }
    }
    out
}

/// Dedupe `raw` and give every surviving name a fresh entrant id. Empty input gives an empty list.
pub fn register_entrants<I, S>(raw: I) -> Vec<Entrant>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    unique_names(raw).into_iter().map(Entrant::new).collect()
}

/// Names from `raw` not already taken by `existing` (case-insensitive), deduped among themselves.
pub fn new_names<I, S>(existing: &[Entrant], raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken: HashSet<String> = existing.iter().map(|e| e.name.to_lowercase()).collect();
    unique_names(raw)
        .into_iter()
        .filter(|n| !taken.contains(&n.to_lowercase()))
        .collect()
}
