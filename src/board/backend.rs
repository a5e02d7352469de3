use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{BoardView, Status, Task, TaskboardError};
use crate::services::TaskService;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The session is gone; the whole board view has to go back through
    /// sign-in.
    #[error("session expired or invalid")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl BackendError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, BackendError::Unauthorized)
    }
}

impl From<TaskboardError> for BackendError {
    fn from(err: TaskboardError) -> Self {
        match err {
            TaskboardError::NotFound(msg) => BackendError::NotFound(msg),
            TaskboardError::Unauthorized(_) => BackendError::Unauthorized,
            other => BackendError::Rejected(other.to_string()),
        }
    }
}

/// Persistence side of the board. Authentication, storage and ordering are
/// the implementation's business.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn update_task_status(&self, task_id: &str, status: Status) -> Result<Task, BackendError>;

    async fn fetch_tasks(&self, board_id: &str) -> Result<BoardView, BackendError>;
}

/// In-process backend over the service layer, acting as one user.
#[derive(Debug, Clone)]
pub struct LocalTaskBackend {
    pool: SqlitePool,
    user_id: String,
}

impl LocalTaskBackend {
    pub fn new(pool: SqlitePool, user_id: impl Into<String>) -> Self {
        Self {
            pool,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl TaskBackend for LocalTaskBackend {
    async fn update_task_status(&self, task_id: &str, status: Status) -> Result<Task, BackendError> {
        Ok(TaskService::update_task_status(&self.pool, &self.user_id, task_id, status).await?)
    }

    async fn fetch_tasks(&self, board_id: &str) -> Result<BoardView, BackendError> {
        Ok(TaskService::fetch_tasks(&self.pool, &self.user_id, board_id).await?)
    }
}
