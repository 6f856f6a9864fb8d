// Word wall layout engine.
// Implements: word graph with duplicate-on-cycle, topological flattening, line packing,
// grid search and highlighting.
// CPU-bound wall builds must run inside tokio::task::spawn_blocking.

pub mod clock;
pub mod error;
pub mod flatten;
pub mod geometry;
pub mod graph;
pub mod grid;
pub mod handlers;
pub mod highlight;
pub mod packer;
pub mod pipeline;
pub mod search;
pub mod sources;
pub mod verify;

// Re-export the public API consumed by other modules (cli, handlers, render).
pub use error::{LayoutError, SourceError, VerifyError};
pub use flatten::PassOrder;
pub use geometry::{default_geometry, WallGeometry};
pub use grid::{Cell, Grid};
pub use highlight::{plan_highlights, Highlight};
pub use packer::DEFAULT_SEED;
pub use pipeline::{build_wall, Wall, WallSettings, WallStats};
pub use search::{search, MatchMode, SearchOutcome, SearchStatus};
pub use sources::{read_filler_words, read_sentences};
pub use verify::VerifyReport;
