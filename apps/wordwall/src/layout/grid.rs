//! Grid assembly: turns packed rows into the read-only character grid that search,
//! highlighting, and rendering consume.

use serde::{Deserialize, Serialize};

use crate::layout::graph::WordGraph;
use crate::layout::packer::PackedRow;

/// A `{row, col}` coordinate in the grid. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Ordered rows of characters. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: lines
                .into_iter()
                .map(|l| l.as_ref().chars().collect())
                .collect(),
        }
    }

    /// Parses grid text: one row per line, surrounding whitespace trimmed, blank lines
    /// skipped.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines().map(str::trim).filter(|l| !l.is_empty()))
    }

    /// Concatenates each packed row's surfaces into one grid line.
    ///
    /// Uppercasing is per character and keeps the packed width: a character whose
    /// uppercase form is more than one character (`ß`) is left as is.
    pub fn assemble(graph: &WordGraph, rows: &[PackedRow], to_upper: bool) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| {
                    row.surfaces(graph)
                        .flat_map(str::chars)
                        .map(|c| if to_upper { upper_char(c) } else { c })
                        .collect()
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Character count of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.iter().collect()).collect()
    }

    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn total_letters(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Row-major index of `cell`, counting every character of every earlier row.
    ///
    /// Returns `None` for cells outside the grid.
    pub fn serial(&self, cell: Cell) -> Option<usize> {
        let row = self.rows.get(cell.row)?;
        if cell.col >= row.len() {
            return None;
        }
        let before: usize = self.rows[..cell.row].iter().map(Vec::len).sum();
        Some(before + cell.col)
    }
}

fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flatten::{flatten, PassOrder};
    use crate::layout::graph::build_graph;
    use crate::layout::packer::LinePacker;

    #[test]
    fn test_parse_skips_blank_lines_and_carriage_returns() {
        let grid = Grid::parse("abc\r\n\r\n  \ndefg\n");
        assert_eq!(grid.lines(), vec!["abc", "defg"]);
        assert_eq!(grid.width(), 4);
    }

    #[test]
    fn test_parse_trims_indented_rows() {
        let grid = Grid::parse("  abc  \n\tdefg\n");
        assert_eq!(grid.lines(), vec!["abc", "defg"]);
        assert_eq!(grid.serial(Cell::new(1, 0)), Some(3));
    }

    #[test]
    fn test_parse_reports_width_and_letters() {
        let grid = Grid::parse("abc\ndefg");
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.total_letters(), 7);
    }

    #[test]
    fn test_serial_counts_every_character_of_earlier_rows() {
        let grid = Grid::from_lines(["abc", "de", "fghi"]);
        assert_eq!(grid.serial(Cell::new(0, 0)), Some(0));
        assert_eq!(grid.serial(Cell::new(1, 1)), Some(4));
        assert_eq!(grid.serial(Cell::new(2, 3)), Some(8));
        assert_eq!(grid.serial(Cell::new(1, 2)), None);
        assert_eq!(grid.serial(Cell::new(3, 0)), None);
    }

    #[test]
    fn test_assemble_joins_surfaces_without_separators() {
        let sentences = [vec!["JT", "loves", "Kira"], vec!["Kira", "loves", "JT"]];
        let graph = build_graph(&sentences, true);
        let order = flatten(&graph, PassOrder::Insertion).unwrap();
        let rows: Vec<_> = LinePacker::new(11).pack(&graph, &order).collect();

        let grid = Grid::assemble(&graph, &rows, false);
        assert_eq!(grid.lines(), vec!["JTlovesKira", "lovesJT"]);

        let upper = Grid::assemble(&graph, &rows, true);
        assert_eq!(upper.lines(), vec!["JTLOVESKIRA", "LOVESJT"]);
    }

    #[test]
    fn test_uppercase_keeps_packed_width() {
        let graph = build_graph(&[vec!["straße", "und"]], true);
        let order = flatten(&graph, PassOrder::Insertion).unwrap();
        let rows: Vec<_> = LinePacker::new(6).pack(&graph, &order).collect();

        let grid = Grid::assemble(&graph, &rows, true);
        assert_eq!(grid.lines(), vec!["STRAßE", "UND"]);
        for (line, row) in grid.rows().iter().zip(&rows) {
            assert_eq!(line.len(), row.letters);
        }
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let grid = Grid::from_lines(["héllo"]);
        assert_eq!(grid.rows()[0][2], 'l');
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.serial(Cell::new(0, 4)), Some(4));
    }
}
