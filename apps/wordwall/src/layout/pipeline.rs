//! Wall pipeline: tokenize → build graph → (merge clock) → flatten → pack → assemble.
//!
//! Pure and synchronous. Callers on the async side run it inside
//! `tokio::task::spawn_blocking`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::layout::clock::merge_clock;
use crate::layout::error::LayoutError;
use crate::layout::flatten::{flatten, PassOrder};
use crate::layout::graph::{GraphBuilder, WordGraph};
use crate::layout::grid::Grid;
use crate::layout::packer::{LinePacker, PackedRow, DEFAULT_SEED};
use crate::layout::sources::tokenize;
use crate::layout::verify::{verify_sentences, VerifyReport};

/// Everything that parameterizes one wall build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSettings {
    /// Row width budget in characters.
    pub columns: usize,
    pub case_sensitive: bool,
    /// Uppercase the rendered rows. Forces case-insensitive keys.
    pub to_upper: bool,
    pub add_fill: bool,
    pub seed: u64,
    pub pass_order: PassOrder,
    /// Empty means the built-in pool.
    pub filler_words: Vec<String>,
    pub include_clock: bool,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            columns: 20,
            case_sensitive: false,
            to_upper: false,
            add_fill: true,
            seed: DEFAULT_SEED,
            pass_order: PassOrder::default(),
            filler_words: Vec::new(),
            include_clock: false,
        }
    }
}

impl WallSettings {
    pub fn case_sensitive_keys(&self) -> bool {
        self.case_sensitive && !self.to_upper
    }

    /// Searches against the built grid must fold case unless both keys and output
    /// preserve it.
    pub fn search_case_insensitive(&self) -> bool {
        !self.case_sensitive_keys()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallStats {
    pub nodes: usize,
    pub duplicates: usize,
    pub roots: usize,
    pub rows: usize,
    pub columns: usize,
    pub total_letters: usize,
    pub filler_words: usize,
}

/// A built wall: the graph, its packed rows, and the assembled grid.
#[derive(Debug, Clone)]
pub struct Wall {
    pub graph: WordGraph,
    pub rows: Vec<PackedRow>,
    pub grid: Grid,
    pub stats: WallStats,
    pub case_insensitive: bool,
}

impl Wall {
    /// Contiguous self-check of `sentences` against this wall's grid.
    pub fn verify<I, S>(&self, sentences: I) -> VerifyReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        verify_sentences(&self.grid, sentences, self.case_insensitive)
    }
}

/// Builds a wall from raw sentence lines. Blank lines are skipped.
pub fn build_wall<S: AsRef<str>>(sentences: &[S], settings: &WallSettings) -> Result<Wall, LayoutError> {
    if settings.columns == 0 {
        return Err(LayoutError::InvalidGeometry(
            "columns must be at least 1".to_string(),
        ));
    }

    let mut builder = GraphBuilder::new(settings.case_sensitive_keys());
    let mut added = 0usize;
    for sentence in sentences {
        let tokens = tokenize(sentence.as_ref());
        if !builder.add_sentence(&tokens).is_empty() {
            added += 1;
        }
    }
    if added == 0 {
        return Err(LayoutError::EmptyCorpus);
    }

    let mut graph = builder.finish();
    if settings.include_clock {
        graph = merge_clock(graph).0;
    }
    debug_assert!(graph.is_acyclic());

    let order = flatten(&graph, settings.pass_order)?;

    let packer = LinePacker::new(settings.columns)
        .with_fill(settings.add_fill)
        .with_filler_words(&settings.filler_words)
        .with_seed(settings.seed);
    let rows: Vec<PackedRow> = packer.pack(&graph, &order).collect();
    let grid = Grid::assemble(&graph, &rows, settings.to_upper);

    let stats = WallStats {
        nodes: graph.len(),
        duplicates: graph.duplicate_count(),
        roots: graph.roots().len(),
        rows: rows.len(),
        columns: settings.columns,
        total_letters: grid.total_letters(),
        filler_words: rows.iter().map(PackedRow::filler_count).sum(),
    };

    info!(
        sentences = added,
        nodes = stats.nodes,
        duplicates = stats.duplicates,
        rows = stats.rows,
        total_letters = stats.total_letters,
        "Built word wall"
    );

    Ok(Wall {
        graph,
        rows,
        grid,
        stats,
        case_insensitive: settings.search_case_insensitive(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(columns: usize) -> WallSettings {
        WallSettings {
            columns,
            add_fill: false,
            ..WallSettings::default()
        }
    }

    #[test]
    fn test_cycle_example_end_to_end() {
        let wall = build_wall(&["JT loves Kira", "Kira loves JT"], &settings(11)).unwrap();
        assert_eq!(wall.grid.lines(), vec!["JTlovesKira", "lovesJT"]);
        assert_eq!(wall.stats.duplicates, 2);
        assert_eq!(wall.stats.total_letters, 18);
        assert!(wall.verify(["JT loves Kira", "Kira loves JT"]).is_clean());
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let empty: [&str; 2] = ["", "   "];
        assert!(matches!(
            build_wall(&empty, &settings(10)),
            Err(LayoutError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_zero_columns_is_rejected() {
        assert!(matches!(
            build_wall(&["a b"], &settings(0)),
            Err(LayoutError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_to_upper_forces_case_insensitive_keys() {
        let s = WallSettings {
            to_upper: true,
            case_sensitive: true,
            ..settings(30)
        };
        let wall = build_wall(&["Love wins", "love conquers all"], &s).unwrap();
        assert!(wall.graph.lookup("LOVE").is_some());
        assert_eq!(wall.stats.nodes, 4);
        assert!(wall.grid.to_text().chars().all(|c| !c.is_lowercase()));
        assert!(wall.case_insensitive);
    }

    #[test]
    fn test_fill_pads_rows_and_counts_fillers() {
        let s = WallSettings {
            add_fill: true,
            filler_words: vec!["x".to_string()],
            ..settings(12)
        };
        let wall = build_wall(&["the quick brown fox jumps"], &s).unwrap();
        for line in wall.grid.lines() {
            assert_eq!(line.chars().count(), 12);
        }
        assert!(wall.stats.filler_words > 0);
    }

    #[test]
    fn test_every_sentence_verifies_under_both_pass_orders() {
        let corpus = ["I love Kira", "we hate you", "I love you"];
        let expected = [
            (PassOrder::Insertion, "IwelovehateKirayou"),
            (PassOrder::LongestFirst, "weIlovehateKirayou"),
        ];
        for (order, prefix) in expected {
            let s = WallSettings {
                pass_order: order,
                ..WallSettings::default()
            };
            let wall = build_wall(&corpus, &s).unwrap();
            let lines = wall.grid.lines();
            assert_eq!(lines.len(), 1);
            // two letters of slack are filled with "a" / "to"
            assert!(lines[0].starts_with(prefix), "{order:?}: {}", lines[0]);
            assert_eq!(lines[0].chars().count(), 20);

            let report = wall.verify(corpus);
            assert!(report.is_clean(), "{order:?}: {:?}", report.misses);
        }
    }

    #[test]
    fn test_clock_adds_vocabulary() {
        let without = build_wall(&["good morning"], &settings(20)).unwrap();
        let with = build_wall(
            &["good morning"],
            &WallSettings {
                include_clock: true,
                ..settings(20)
            },
        )
        .unwrap();
        assert!(with.stats.nodes > without.stats.nodes);
        assert_eq!(with.stats.roots, 2);
        assert!(with.graph.lookup("quarter").is_some());
        assert!(with.graph.is_acyclic());
    }

    #[test]
    fn test_same_settings_build_identical_walls() {
        let corpus = ["I love Kira", "we hate you", "I love you"];
        let a = build_wall(&corpus, &WallSettings::default()).unwrap();
        let b = build_wall(&corpus, &WallSettings::default()).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.stats, b.stats);
    }
}
