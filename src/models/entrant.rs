//! Entrant: a named competitor registered in one tournament.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entrant (used in match slots and lookups).
pub type EntrantId = Uuid;

/// A competitor, team or player taking part in a bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
}

impl Entrant {
    /// Create an entrant with a fresh id. The name is stored as given; trimming happens at registration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Case-insensitive name comparison used for dedupe and seed lookup.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
