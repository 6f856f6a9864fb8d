//! Grid word-search.
//!
//! One engine, two match modes:
//! - `Contiguous`: each token must appear whole within a single row. After a match the
//!   cursor moves just past it on the same row.
//! - `NonContiguous`: each letter is located independently, forward of the cursor, so a
//!   word's letters may be scattered across the grid.
//!
//! Neither mode searches backward of the cursor. A token that cannot be found ends the
//! search; the words matched so far are returned with `SearchStatus::Incomplete`.
//! The grid is never mutated; case folding happens per comparison.

use serde::{Deserialize, Serialize};

use crate::layout::grid::{Cell, Grid};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Whole tokens within one row.
    Contiguous,
    /// Letter by letter, anywhere forward of the cursor.
    #[default]
    NonContiguous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    Complete,
    /// The token at `word_index` was not found; later tokens were not attempted.
    Incomplete { word_index: usize, missing: String },
}

/// Per-token cell lists plus whether every token was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub words: Vec<Vec<Cell>>,
    pub status: SearchStatus,
}

impl SearchOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Complete
    }

    /// The missing token, if the search stopped early.
    pub fn missing(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Complete => None,
            SearchStatus::Incomplete { missing, .. } => Some(missing),
        }
    }
}

fn chars_eq(a: char, b: char, case_insensitive: bool) -> bool {
    a == b || (case_insensitive && a.to_lowercase().eq(b.to_lowercase()))
}

/// Positions to scan from `start`: the rest of the start row, then every later row
/// from column 0.
fn scan_from(grid: &Grid, start: Cell) -> impl Iterator<Item = (usize, usize, &[char])> + '_ {
    grid.rows()
        .iter()
        .enumerate()
        .skip(start.row)
        .flat_map(move |(r, row)| {
            let from = if r == start.row { start.col } else { 0 };
            (from..row.len()).map(move |c| (r, c, row.as_slice()))
        })
}

/// Finds the first cell at or after `start` (row-major) where `token` matches in full
/// without crossing a row boundary.
///
/// An empty token never matches.
pub fn first_match(grid: &Grid, token: &str, start: Cell, case_insensitive: bool) -> Option<Cell> {
    let needle: Vec<char> = token.chars().collect();
    if needle.is_empty() {
        return None;
    }

    scan_from(grid, start)
        .find(|&(_, col, row)| {
            row.len() - col >= needle.len()
                && row[col..col + needle.len()]
                    .iter()
                    .zip(&needle)
                    .all(|(&a, &b)| chars_eq(a, b, case_insensitive))
        })
        .map(|(row, col, _)| Cell::new(row, col))
}

/// Finds the first occurrence of one letter at or after `start`.
fn first_letter(grid: &Grid, letter: char, start: Cell, case_insensitive: bool) -> Option<Cell> {
    scan_from(grid, start)
        .find(|&(_, col, row)| chars_eq(row[col], letter, case_insensitive))
        .map(|(row, col, _)| Cell::new(row, col))
}

/// Searches for every whitespace-delimited token of `sentence`, starting at the origin.
pub fn search(grid: &Grid, sentence: &str, mode: MatchMode, case_insensitive: bool) -> SearchOutcome {
    search_from(grid, sentence, Cell::ORIGIN, mode, case_insensitive)
}

/// Same as [`search`] with an explicit starting cursor.
pub fn search_from(
    grid: &Grid,
    sentence: &str,
    start: Cell,
    mode: MatchMode,
    case_insensitive: bool,
) -> SearchOutcome {
    let mut cursor = start;
    let mut words = Vec::new();

    for (word_index, token) in sentence.split_whitespace().enumerate() {
        let found = match mode {
            MatchMode::Contiguous => match_token(grid, token, &mut cursor, case_insensitive),
            MatchMode::NonContiguous => match_letters(grid, token, &mut cursor, case_insensitive),
        };
        match found {
            Some(cells) => words.push(cells),
            None => {
                return SearchOutcome {
                    words,
                    status: SearchStatus::Incomplete {
                        word_index,
                        missing: token.to_string(),
                    },
                }
            }
        }
    }

    SearchOutcome {
        words,
        status: SearchStatus::Complete,
    }
}

fn match_token(grid: &Grid, token: &str, cursor: &mut Cell, ci: bool) -> Option<Vec<Cell>> {
    let at = first_match(grid, token, *cursor, ci)?;
    let len = token.chars().count();
    *cursor = Cell::new(at.row, at.col + len);
    Some((0..len).map(|i| Cell::new(at.row, at.col + i)).collect())
}

fn match_letters(grid: &Grid, token: &str, cursor: &mut Cell, ci: bool) -> Option<Vec<Cell>> {
    let mut cells = Vec::with_capacity(token.len());
    for letter in token.chars() {
        let at = first_letter(grid, letter, *cursor, ci)?;
        *cursor = Cell::new(at.row, at.col + 1);
        cells.push(at);
    }
    Some(cells)
}
