use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::layout::DEFAULT_SEED;

/// Server configuration loaded from environment variables.
/// Everything has a default, so a bare `wordwall serve` works without a `.env`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Seed used when a wall request does not carry one.
    pub seed: u64,
    /// Filler word file used when a wall request does not list its own words.
    pub filler_words: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed: optional_env("WORDWALL_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("WORDWALL_SEED must be an unsigned integer")?
                .unwrap_or(DEFAULT_SEED),
            filler_words: optional_env("WORDWALL_FILLER_WORDS").map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            seed: DEFAULT_SEED,
            filler_words: None,
        }
    }
}

/// Unset and blank variables are both `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
