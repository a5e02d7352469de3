use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::domain::{BoardEvent, TaskboardError};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Option<SqlitePool>,
    pub events_tx: broadcast::Sender<BoardEvent>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        db: Option<SqlitePool>,
        events_tx: broadcast::Sender<BoardEvent>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            db,
            events_tx,
            config,
        }
    }

    pub fn require_db(&self) -> Result<&SqlitePool, TaskboardError> {
        self.db
            .as_ref()
            .ok_or_else(|| TaskboardError::Internal("Database not available".into()))
    }

    pub fn publish(&self, event: BoardEvent) {
        // No connected dashboards is not an error.
        let _ = self.events_tx.send(event);
    }
}
