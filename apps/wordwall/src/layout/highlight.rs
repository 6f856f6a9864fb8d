//! Highlight planning: maps search results onto palette colours and LED serials.
//!
//! LEDs sit behind the grid in row-major order, one per character, so a cell's serial is
//! its running index across all rows. Word `i` of a search uses palette entry
//! `i % PALETTE_SIZE`.

use serde::{Deserialize, Serialize};

use crate::layout::grid::{Cell, Grid};
use crate::layout::search::SearchOutcome;

pub const PALETTE_SIZE: usize = 8;

/// Red, blue, green, yellow, purple, pink, orange, teal.
pub const PALETTE: [[u8; 3]; PALETTE_SIZE] = [
    [255, 100, 100],
    [100, 150, 255],
    [100, 255, 150],
    [255, 255, 100],
    [200, 100, 255],
    [255, 150, 200],
    [255, 180, 100],
    [100, 220, 200],
];

/// Lighting instructions for one matched word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub word_index: usize,
    pub palette_index: usize,
    pub rgb: [u8; 3],
    pub cells: Vec<Cell>,
    pub serials: Vec<usize>,
}

/// One highlight per matched word, in word order.
///
/// Cells outside the grid (possible only if the outcome came from a different grid)
/// are kept in `cells` but have no serial.
pub fn plan_highlights(grid: &Grid, outcome: &SearchOutcome) -> Vec<Highlight> {
    outcome
        .words
        .iter()
        .enumerate()
        .map(|(word_index, cells)| {
            let palette_index = word_index % PALETTE_SIZE;
            Highlight {
                word_index,
                palette_index,
                rgb: PALETTE[palette_index],
                cells: cells.clone(),
                serials: cells.iter().filter_map(|&c| grid.serial(c)).collect(),
            }
        })
        .collect()
}

/// Per-LED colours for the whole grid; unlit LEDs are black. A cell matched by
/// several words takes the colour of the last one.
pub fn led_frame(grid: &Grid, highlights: &[Highlight]) -> Vec<[u8; 3]> {
    let mut frame = vec![[0u8; 3]; grid.total_letters()];
    for highlight in highlights {
        for &serial in &highlight.serials {
            if let Some(led) = frame.get_mut(serial) {
                *led = highlight.rgb;
            }
        }
    }
    frame
}
