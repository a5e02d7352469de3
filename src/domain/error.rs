use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum TaskboardError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TaskboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskboardError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskboardError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TaskboardError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            TaskboardError::Internal(_)
            | TaskboardError::Database(_)
            | TaskboardError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the client. Storage and encoding failures stay in the logs.
    fn public_message(&self) -> String {
        match self {
            TaskboardError::NotFound(msg)
            | TaskboardError::BadRequest(msg)
            | TaskboardError::Unauthorized(msg)
            | TaskboardError::Internal(msg) => msg.clone(),
            TaskboardError::Database(_) | TaskboardError::Serialization(_) => {
                "Internal server error".into()
            }
        }
    }
}

impl IntoResponse for TaskboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if matches!(
            self,
            TaskboardError::Database(_) | TaskboardError::Serialization(_)
        ) {
            tracing::error!(error = ?self, "Board request failed");
        }

        let body = json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
