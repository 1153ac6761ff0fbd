//! Entry import: names from a "Players" column (CSV text or a spreadsheet) or from pasted lines.

use crate::logic::registry::unique_names;
use crate::models::TournamentError;
use calamine::{open_workbook_auto_from_rs, Reader};
use std::io::Cursor;

/// Header of the column that holds entrant names (compared case-insensitively).
pub const ENTRANTS_COLUMN: &str = "players";

fn is_entrants_header(header: &str) -> bool {
    header.trim().eq_ignore_ascii_case(ENTRANTS_COLUMN)
}

/// Pick the delimiter used in the header line: comma, tab or semicolon, whichever shows up first.
fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    header
        .bytes()
        .find(|b| matches!(b, b',' | b'\t' | b';'))
        .unwrap_or(b',')
}

/// Read entrant names from CSV text.
///
/// The first non-blank line is the header; the column titled "Players" is used. Rows shorter than the
/// header count as empty for that column. Returns an empty list when there is no such column.
pub fn parse_csv_entrants(text: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let idx = match reader.headers() {
        Ok(headers) => headers
            .iter()
            .position(is_entrants_header),
        Err(e) => {
            log::warn!("Could not read CSV header: {}", e);
            None
        }
    };
    let Some(idx) = idx else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for record in reader.records() {
        match record {
            Ok(r) => names.push(r.get(idx).unwrap_or("").to_string()),
            Err(e) => log::warn!("Skipping unreadable CSV row: {}", e),
        }
    }
    unique_names(names)
}

/// Read entrant names from the first sheet of an .xlsx / .xls / .ods workbook.
///
/// The first row of the sheet is the header; the "Players" column is used and empty cells are
/// skipped. An unreadable workbook or a sheet without that column gives an empty list.
pub fn parse_spreadsheet_entrants(bytes: &[u8]) -> Vec<String> {
    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(wb) => wb,
        Err(e) => {
            log::warn!("Could not open spreadsheet: {}", e);
            return Vec::new();
        }
    };
    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            log::warn!("Could not read first sheet: {}", e);
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut rows = range.rows();
    let Some(idx) = rows
        .next()
        .and_then(|header| header.iter().position(|c| is_entrants_header(&c.to_string())))
    else {
        return Vec::new();
    };
    unique_names(rows.filter_map(|row| row.get(idx)).map(|cell| cell.to_string()))
}

/// One name per line, as typed into a text box.
pub fn parse_lines(text: &str) -> Vec<String> {
    unique_names(text.lines())
}

/// Turn an empty import into `NoEntrantsFound`.
pub fn require_entrants(names: Vec<String>) -> Result<Vec<String>, TournamentError> {
    if names.is_empty() {
        return Err(TournamentError::NoEntrantsFound);
    }
    Ok(names)
}
