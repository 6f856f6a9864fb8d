use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning a corpus into a wall.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The flattener ran out of zero-indegree nodes before emitting every node.
    /// The builder never produces a cycle, so this is a defect, not a runtime condition.
    #[error("word graph contains a cycle; stalled on: {}", stalled.join(", "))]
    CycleDetected { stalled: Vec<String> },

    #[error("invalid wall geometry: {0}")]
    InvalidGeometry(String),

    #[error("no sentences to lay out")]
    EmptyCorpus,
}

/// Failures reading sentence or filler word files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raised by the layout self-check when a sentence cannot be traced through the grid.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("sentence \"{sentence}\" could not be traced: word \"{missing}\" not found")]
    Unreachable { sentence: String, missing: String },
}
