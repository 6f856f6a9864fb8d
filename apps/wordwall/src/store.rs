use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::wall::WallRecord;

/// In-memory wall store shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct WallStore {
    walls: Arc<RwLock<HashMap<Uuid, WallRecord>>>,
}

impl WallStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: WallRecord) -> Uuid {
        let id = record.id;
        self.walls.write().await.insert(id, record);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<WallRecord> {
        self.walls.read().await.get(&id).cloned()
    }
}
