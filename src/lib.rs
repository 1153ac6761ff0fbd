//! Single-elimination bracket maker: library with models, bracket engine and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    add_entries, advance_round, bracket_size, create_tournament, export_csv, parse_csv_entrants,
    parse_lines, parse_spreadsheet_entrants, place_seeds, record_winner, register_entrants, render_printable,
    require_entrants, stage_label, standings, unique_names, winners, MergeOutcome, RoundAdvance,
    Standings,
};
pub use models::{
    BracketMatch, Entrant, EntrantId, MatchId, MatchStatus, Side, Snapshot, Tournament,
    TournamentError, TournamentId, TournamentRepository, TournamentStatus,
};
pub use store::{FileStore, StoreError};
