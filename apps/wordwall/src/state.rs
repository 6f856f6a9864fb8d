use crate::config::Config;
use crate::store::WallStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub walls: WallStore,
    pub config: Config,
    /// Filler words loaded once at startup from `WORDWALL_FILLER_WORDS`; empty means the
    /// built-in pool.
    pub filler_words: Vec<String>,
}
