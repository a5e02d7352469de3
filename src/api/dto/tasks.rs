use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Status, TaskboardError};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl UpdateTaskRequest {
    pub fn status_only(status: Status) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
            ..Self::default()
        }
    }
}

pub(crate) fn parse_status(value: Option<&str>) -> Result<Option<Status>, TaskboardError> {
    value
        .map(|s| s.parse::<Status>().map_err(TaskboardError::BadRequest))
        .transpose()
}

pub(crate) fn parse_priority(value: Option<&str>) -> Result<Option<Priority>, TaskboardError> {
    value
        .map(|s| s.parse::<Priority>().map_err(TaskboardError::BadRequest))
        .transpose()
}
