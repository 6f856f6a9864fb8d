mod cli;
mod config;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::layout::read_filler_words;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::WallStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Command::Serve => Some(Config::from_env()?),
        _ => None,
    };
    let level = config
        .as_ref()
        .map_or(cli.log_level.as_str(), |c| c.rust_log.as_str());

    // Initialize structured logging; stderr keeps stdout for the wall itself
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Generate(args) => cli::run_generate(&args),
        Command::Search(args) => cli::run_search(&args),
        Command::Serve => serve(config.unwrap_or_default()).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting wordwall API v{}", env!("CARGO_PKG_VERSION"));

    let filler_words = match &config.filler_words {
        Some(path) => read_filler_words(path).context("Failed to load WORDWALL_FILLER_WORDS")?,
        None => Vec::new(),
    };
    info!(
        seed = config.seed,
        filler_words = filler_words.len(),
        "Wall defaults loaded"
    );

    // Build app state
    let state = AppState {
        walls: WallStore::new(),
        config: config.clone(),
        filler_words,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
