//! Bracket engine: registry, seeding, generation, progression, late entries, standings.

mod generator;
mod import;
mod merge;
mod progression;
mod registry;
mod report;
mod seeding;

pub use generator::{
    create_tournament, default_seeds, generate_round_one, layout_round_one, pair_slots,
    MAX_SEEDS,
};
pub use import::{
    parse_csv_entrants, parse_lines, parse_spreadsheet_entrants, require_entrants, ENTRANTS_COLUMN,
};
pub use merge::{add_entries, MergeOutcome};
pub use progression::{advance_round, record_winner, RoundAdvance};
pub use registry::{new_names, register_entrants, unique_names};
pub use report::{
    export_csv, render_printable, round_title, stage_label, standings, winners, MatchLine,
    RoundView, Standings, EMPTY_SLOT,
};
pub use seeding::{bracket_size, place_seeds};
