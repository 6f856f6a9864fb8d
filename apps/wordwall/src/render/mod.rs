//! Output adapters for a finished grid. No layout logic lives here.

pub mod console;
pub mod svg;
