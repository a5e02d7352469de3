use async_trait::async_trait;
use reqwest::{header, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::dto::UpdateTaskRequest;
use crate::auth::cookies;
use crate::board::backend::{BackendError, TaskBackend};
use crate::domain::{BoardView, Status, Task};

/// Talks to a running taskboard server with an existing session token.
#[derive(Debug, Clone)]
pub struct HttpTaskBackend {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpTaskBackend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn session_cookie(&self) -> String {
        format!("{}={}", cookies::TOKEN_COOKIE, self.token)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or_else(|| status.to_string());

        Err(match status {
            StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
            StatusCode::NOT_FOUND => BackendError::NotFound(message),
            _ => BackendError::Rejected(format!("{}: {}", status, message)),
        })
    }
}

#[async_trait]
impl TaskBackend for HttpTaskBackend {
    async fn update_task_status(&self, task_id: &str, status: Status) -> Result<Task, BackendError> {
        let response = self
            .client
            .patch(format!("{}/api/tasks/{}", self.base_url, task_id))
            .header(header::COOKIE, self.session_cookie())
            .json(&UpdateTaskRequest::status_only(status))
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn fetch_tasks(&self, board_id: &str) -> Result<BoardView, BackendError> {
        let response = self
            .client
            .get(format!("{}/api/boards/{}/tasks", self.base_url, board_id))
            .header(header::COOKIE, self.session_cookie())
            .send()
            .await?;

        Self::decode(response).await
    }
}
