use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::layout::{Grid, VerifyReport, Wall, WallGeometry, WallSettings, WallStats};

/// A built wall as kept by the store and returned by `GET /api/v1/walls/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sentences: Vec<String>,
    /// Grid rows as rendered text.
    pub rows: Vec<String>,
    pub stats: WallStats,
    pub verify: VerifyReport,
    pub case_insensitive: bool,
    pub settings: WallSettings,
    pub geometry: WallGeometry,
}

impl WallRecord {
    pub fn new(
        wall: &Wall,
        sentences: Vec<String>,
        verify: VerifyReport,
        settings: WallSettings,
        geometry: WallGeometry,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            sentences,
            rows: wall.grid.lines(),
            stats: wall.stats.clone(),
            verify,
            case_insensitive: wall.case_insensitive,
            settings,
            geometry,
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::from_lines(&self.rows)
    }
}
