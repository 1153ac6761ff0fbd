//! Standings, winners view and printable / CSV export of a bracket.

use crate::models::{BracketMatch, EntrantId, MatchStatus, Tournament, TournamentId, TournamentStatus};
use serde::Serialize;

/// Placeholder shown for an empty slot.
pub const EMPTY_SLOT: &str = "BYE/TBD";

/// Stage name for a round with `match_count` matches, if it has one.
pub fn stage_label(match_count: usize) -> Option<&'static str> {
    match match_count {
        1 => Some("Finals"),
        2 => Some("Semi Finals"),
        4 => Some("Quarter Finals"),
        8 => Some("Pre quarters"),
        _ => None,
    }
}

/// Stage name, falling back to "Round N".
pub fn round_title(round: u32, match_count: usize) -> String {
    stage_label(match_count)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Round {}", round))
}

/// One match as shown in standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchLine {
    /// 1-based position within the round.
    pub number: usize,
    pub slot_a: String,
    pub slot_b: String,
    pub winner: Option<String>,
    pub status: MatchStatus,
}

/// One round of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub title: String,
    pub matches: Vec<MatchLine>,
}

/// Read-only view of a tournament for display, print and export.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standings {
    pub tournament_id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    /// Title of the latest round.
    pub current_stage: String,
    pub champion: Option<String>,
    pub rounds: Vec<RoundView>,
}

fn display_name(t: &Tournament, id: Option<EntrantId>) -> String {
    match id {
        Some(id) => t.entrant_name(id).unwrap_or("Unknown").to_string(),
        None => EMPTY_SLOT.to_string(),
    }
}

fn match_line(t: &Tournament, number: usize, m: &BracketMatch) -> MatchLine {
    MatchLine {
        number,
        slot_a: display_name(t, m.slot_a),
        slot_b: display_name(t, m.slot_b),
        winner: m.winner.map(|w| display_name(t, Some(w))),
        status: m.status,
    }
}

fn round_views<F>(t: &Tournament, keep: F) -> Vec<RoundView>
where
    F: Fn(&BracketMatch) -> bool,
{
    (1..=t.current_round())
        .map(|round| {
            let matches: Vec<&BracketMatch> = t.round_matches(round).filter(|&m| keep(m)).collect();
            RoundView {
                round,
                title: round_title(round, matches.len()),
                matches: matches
                    .into_iter()
                    .enumerate()
                    .map(|(i, m)| match_line(t, i + 1, m))
                    .collect(),
            }
        })
        .filter(|r| !r.matches.is_empty())
        .collect()
}

/// Every round with every match.
pub fn standings(t: &Tournament) -> Standings {
    let rounds = round_views(t, |_| true);
    let current_stage = rounds
        .last()
        .map(|r| r.title.clone())
        .unwrap_or_else(|| round_title(1, 0));
    Standings {
        tournament_id: t.id,
        name: t.name.clone(),
        status: t.status,
        current_stage,
        champion: t.champion.map(|c| display_name(t, Some(c))),
        rounds,
    }
}

/// Decided Semi Finals and Finals of a completed tournament. None while still active.
pub fn winners(t: &Tournament) -> Option<Standings> {
    if !t.is_completed() {
        return None;
    }
    let mut view = standings(t);
    view.rounds = round_views(t, BracketMatch::is_decided)
        .into_iter()
        .filter(|r| matches!(r.title.as_str(), "Finals" | "Semi Finals"))
        .collect();
    Some(view)
}

/// Plain-text bracket sheet for printing.
pub fn render_printable(s: &Standings) -> String {
    let mut out = String::new();
    out.push_str(&s.name);
    out.push('\n');
    match (&s.status, &s.champion) {
        (TournamentStatus::Completed, champion) => out.push_str(&format!(
            "Completed - Champion: {}\n",
            champion.as_deref().unwrap_or("TBD")
        )),
        (TournamentStatus::Active, _) => {
            out.push_str(&format!("Active - Current: {}\n", s.current_stage))
        }
    }
    for r in &s.rounds {
        out.push('\n');
        out.push_str(&r.title);
        out.push('\n');
        for m in &r.matches {
            let winner = m.winner.as_deref().unwrap_or("TBD");
            if r.matches.len() == 1 {
                out.push_str(&format!("  {} vs {} - {}\n", m.slot_a, m.slot_b, winner));
            } else {
                out.push_str(&format!(
                    "  Match {}: {} vs {} - {}\n",
                    m.number, m.slot_a, m.slot_b, winner
                ));
            }
        }
    }
    out
}

#[derive(Serialize)]
struct CsvRow<'a> {
    round: u32,
    stage: &'a str,
    #[serde(rename = "match")]
    number: usize,
    slot_a: &'a str,
    slot_b: &'a str,
    winner: &'a str,
    status: MatchStatus,
}

/// Standings as CSV, one row per match.
pub fn export_csv(s: &Standings) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in &s.rounds {
        for m in &r.matches {
            writer.serialize(CsvRow {
                round: r.round,
                stage: &r.title,
                number: m.number,
                slot_a: &m.slot_a,
                slot_b: &m.slot_b,
                winner: m.winner.as_deref().unwrap_or(""),
                status: m.status,
            })?;
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
