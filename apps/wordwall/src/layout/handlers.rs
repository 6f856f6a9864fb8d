use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::highlight::led_frame;
use crate::layout::{
    build_wall, default_geometry, plan_highlights, search, Grid, Highlight, MatchMode, PassOrder,
    SearchOutcome, VerifyReport, WallGeometry, WallSettings, WallStats,
};
use crate::models::wall::WallRecord;
use crate::render::svg::render_svg;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateWallRequest {
    pub sentences: Vec<String>,
    /// Overrides the column budget derived from `geometry`.
    pub columns: Option<usize>,
    pub geometry: Option<WallGeometry>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub to_upper: bool,
    pub add_fill: Option<bool>,
    pub seed: Option<u64>,
    pub filler_words: Option<Vec<String>>,
    #[serde(default)]
    pub include_clock: bool,
    #[serde(default)]
    pub pass_order: PassOrder,
}

#[derive(Debug, Serialize)]
pub struct CreateWallResponse {
    pub id: Uuid,
    pub rows: Vec<String>,
    pub stats: WallStats,
    pub verify: VerifyReport,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub sentence: String,
    #[serde(default)]
    pub mode: MatchMode,
    /// Defaults to the wall's own case handling.
    pub case_insensitive: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct GridSearchRequest {
    /// Grid text, one row per line.
    pub grid: String,
    pub sentence: String,
    #[serde(default)]
    pub mode: MatchMode,
    /// Defaults to case-insensitive.
    pub case_insensitive: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outcome: SearchOutcome,
    pub highlights: Vec<Highlight>,
    /// One RGB triple per letter in row-major order, ready for an LED strip.
    pub leds: Vec<[u8; 3]>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/walls
pub async fn handle_create_wall(
    State(state): State<AppState>,
    Json(req): Json<CreateWallRequest>,
) -> Result<Json<CreateWallResponse>, AppError> {
    let sentences: Vec<String> = req
        .sentences
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return Err(AppError::Validation("sentences cannot be empty".to_string()));
    }

    let geometry = req.geometry.unwrap_or_else(default_geometry);
    let columns = match req.columns {
        Some(0) => return Err(AppError::Validation("columns must be at least 1".to_string())),
        Some(n) => n,
        None => geometry.columns()?,
    };

    let settings = WallSettings {
        columns,
        case_sensitive: req.case_sensitive,
        to_upper: req.to_upper,
        add_fill: req.add_fill.unwrap_or(true),
        seed: req.seed.unwrap_or(state.config.seed),
        pass_order: req.pass_order,
        filler_words: req
            .filler_words
            .unwrap_or_else(|| state.filler_words.clone()),
        include_clock: req.include_clock,
    };

    // CPU-bound build runs on the blocking pool.
    let build_sentences = sentences.clone();
    let build_settings = settings.clone();
    let (wall, verify) = tokio::task::spawn_blocking(move || {
        let wall = build_wall(&build_sentences, &build_settings)?;
        let verify = wall.verify(&build_sentences);
        Ok::<_, crate::layout::LayoutError>((wall, verify))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed building wall: {e}")))??;

    if !verify.is_clean() {
        warn!(misses = verify.misses.len(), "Wall built with untraceable sentences");
    }

    let record = WallRecord::new(&wall, sentences, verify, settings, geometry);
    let response = CreateWallResponse {
        id: record.id,
        rows: record.rows.clone(),
        stats: record.stats.clone(),
        verify: record.verify.clone(),
    };
    let id = state.walls.insert(record).await;
    info!(%id, rows = response.stats.rows, "Stored wall");

    Ok(Json(response))
}

/// GET /api/v1/walls/:id
pub async fn handle_get_wall(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WallRecord>, AppError> {
    let record = find_wall(&state, id).await?;
    Ok(Json(record))
}

/// GET /api/v1/walls/:id/svg
pub async fn handle_get_wall_svg(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = find_wall(&state, id).await?;
    let svg = render_svg(&record.grid(), &record.geometry);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// POST /api/v1/walls/:id/search
pub async fn handle_search_wall(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let record = find_wall(&state, id).await?;
    let case_insensitive = req.case_insensitive.unwrap_or(record.case_insensitive);
    run_search(&record.grid(), &req.sentence, req.mode, case_insensitive).map(Json)
}

/// POST /api/v1/search
///
/// Searches a caller-supplied grid, e.g. one edited by hand after generation.
pub async fn handle_search_grid(
    Json(req): Json<GridSearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let grid = Grid::parse(&req.grid);
    if grid.is_empty() {
        return Err(AppError::UnprocessableEntity("grid has no rows".to_string()));
    }
    run_search(
        &grid,
        &req.sentence,
        req.mode,
        req.case_insensitive.unwrap_or(true),
    )
    .map(Json)
}

async fn find_wall(state: &AppState, id: Uuid) -> Result<WallRecord, AppError> {
    state
        .walls
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("wall {id}")))
}

fn run_search(
    grid: &Grid,
    sentence: &str,
    mode: MatchMode,
    case_insensitive: bool,
) -> Result<SearchResponse, AppError> {
    if sentence.trim().is_empty() {
        return Err(AppError::Validation("sentence cannot be empty".to_string()));
    }
    let outcome = search(grid, sentence, mode, case_insensitive);
    if !outcome.is_complete() {
        debug!(?outcome.status, "Search stopped early");
    }
    let highlights = plan_highlights(grid, &outcome);
    let leds = led_frame(grid, &highlights);
    Ok(SearchResponse {
        outcome,
        highlights,
        leds,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
