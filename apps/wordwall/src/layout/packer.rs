//! Line packer: bins the flattened word sequence into fixed-width rows.
//!
//! Words are appended to the current row while the running character count (no
//! separators) stays within the width budget. When the next word would overflow, the
//! row is closed and, if filling is enabled, padded with randomly chosen filler words
//! that fit the remaining slack.
//!
//! Filler choice uses a `StdRng` seeded per `pack` call, so repeated packs of the same
//! sequence with the same seed and filler pool yield identical rows.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::graph::{NodeId, WordGraph};

/// Used when filling is requested without a filler pool.
pub const DEFAULT_FILLER_WORDS: [&str; 7] =
    ["a", "to", "and", "help", "tight", "output", "someone"];

pub const DEFAULT_SEED: u64 = 42;

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

/// One entry of a packed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowItem {
    /// A word from the flattened graph.
    Word(NodeId),
    /// Synthetic padding.
    Filler(String),
}

/// A closed row: graph words followed by any filler padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedRow {
    pub items: Vec<RowItem>,
    /// Total characters across all items.
    pub letters: usize,
}

impl PackedRow {
    /// Item surfaces in order.
    pub fn surfaces<'a>(&'a self, graph: &'a WordGraph) -> impl Iterator<Item = &'a str> {
        self.items.iter().map(move |item| match item {
            RowItem::Word(id) => graph.surface(*id),
            RowItem::Filler(word) => word.as_str(),
        })
    }

    pub fn filler_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, RowItem::Filler(_)))
            .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Packer
// ────────────────────────────────────────────────────────────────────────────

/// Row-width budget plus filler settings.
#[derive(Debug, Clone)]
pub struct LinePacker {
    width: usize,
    fill: bool,
    fillers: Vec<String>,
    seed: u64,
}

impl LinePacker {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            fill: false,
            fillers: default_fillers(),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Replaces the filler pool. Blank entries are dropped; an empty pool falls back to
    /// [`DEFAULT_FILLER_WORDS`].
    pub fn with_filler_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        self.fillers = if words.is_empty() {
            default_fillers()
        } else {
            words
        };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lazily packs `sequence` into rows. Each call starts a fresh RNG from the seed.
    pub fn pack<'a>(&'a self, graph: &'a WordGraph, sequence: &'a [NodeId]) -> PackedRows<'a> {
        PackedRows {
            packer: self,
            graph,
            sequence: sequence.iter(),
            rng: StdRng::seed_from_u64(self.seed),
            current: Vec::new(),
            current_len: 0,
        }
    }
}

fn default_fillers() -> Vec<String> {
    DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Iterator over packed rows; see [`LinePacker::pack`].
pub struct PackedRows<'a> {
    packer: &'a LinePacker,
    graph: &'a WordGraph,
    sequence: std::slice::Iter<'a, NodeId>,
    rng: StdRng,
    current: Vec<RowItem>,
    current_len: usize,
}

impl PackedRows<'_> {
    /// Takes the current row, padding it with fillers if enabled.
    fn close_row(&mut self) -> PackedRow {
        let mut items = std::mem::take(&mut self.current);
        let mut letters = std::mem::replace(&mut self.current_len, 0);

        if self.packer.fill {
            let mut slack = self.packer.width.saturating_sub(letters);
            while slack > 0 {
                let candidates: Vec<&String> = self
                    .packer
                    .fillers
                    .iter()
                    .filter(|w| w.chars().count() <= slack)
                    .collect();
                if candidates.is_empty() {
                    warn!(slack, "No filler word short enough, leaving row under-filled");
                    break;
                }
                let word = candidates[self.rng.gen_range(0..candidates.len())];
                let len = word.chars().count();
                slack -= len;
                letters += len;
                items.push(RowItem::Filler(word.clone()));
            }
        }

        PackedRow { items, letters }
    }
}

impl Iterator for PackedRows<'_> {
    type Item = PackedRow;

    fn next(&mut self) -> Option<PackedRow> {
        loop {
            let Some(&id) = self.sequence.next() else {
                return if self.current.is_empty() {
                    None
                } else {
                    Some(self.close_row())
                };
            };

            let len = self.graph.node(id).char_len();
            // A word wider than the budget still gets a row of its own.
            if !self.current.is_empty() && self.current_len + len > self.packer.width {
                let row = self.close_row();
                self.current.push(RowItem::Word(id));
                self.current_len = len;
                return Some(row);
            }

            self.current.push(RowItem::Word(id));
            self.current_len += len;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
