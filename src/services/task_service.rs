use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::api::dto::tasks::{parse_priority, parse_status};
use crate::api::dto::{CreateTaskRequest, UpdateTaskRequest};
use crate::domain::{BoardView, Priority, Status, Task, TaskboardError};
use crate::services::BoardService;

const TASK_COLUMNS: &str =
    "id, board_id, user_id, title, description, status, priority, created_at";

pub struct TaskService;

impl TaskService {
    /// Loads a board and its tasks, newest first, partitioned into columns.
    pub async fn fetch_tasks(
        pool: &SqlitePool,
        user_id: &str,
        board_id: &str,
    ) -> Result<BoardView, TaskboardError> {
        let board = BoardService::get_board(pool, user_id, board_id).await?;

        let tasks: Vec<Task> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE board_id = ? ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(BoardView::from_tasks(board, tasks))
    }

    pub async fn create_task(
        pool: &SqlitePool,
        user_id: &str,
        board_id: &str,
        req: CreateTaskRequest,
    ) -> Result<Task, TaskboardError> {
        BoardService::get_board(pool, user_id, board_id).await?;

        let title = req.title.trim();
        if title.is_empty() {
            return Err(TaskboardError::BadRequest("Task title is required".into()));
        }
        let status = parse_status(req.status.as_deref())?.unwrap_or(Status::Todo);
        let priority = parse_priority(req.priority.as_deref())?.unwrap_or(Priority::Low);

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let task: Task = sqlx::query_as(&format!(
            "INSERT INTO tasks (id, board_id, user_id, title, description, status, priority, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {TASK_COLUMNS}"
        ))
        .bind(&id)
        .bind(board_id)
        .bind(user_id)
        .bind(title)
        .bind(req.description.unwrap_or_default())
        .bind(status)
        .bind(priority)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    pub async fn get_task(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
    ) -> Result<Task, TaskboardError> {
        sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| TaskboardError::NotFound(format!("Task not found: {}", id)))
    }

    pub async fn update_task(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
        req: UpdateTaskRequest,
    ) -> Result<Task, TaskboardError> {
        let status = parse_status(req.status.as_deref())?;
        let priority = parse_priority(req.priority.as_deref())?;
        let title = req.title.map(|t| t.trim().to_string());
        if title.as_deref() == Some("") {
            return Err(TaskboardError::BadRequest("Task title cannot be empty".into()));
        }

        let existing = Self::get_task(pool, user_id, id).await?;

        let task: Task = sqlx::query_as(&format!(
            "UPDATE tasks SET title = ?, description = ?, status = ?, priority = ? WHERE id = ? AND user_id = ? RETURNING {TASK_COLUMNS}"
        ))
        .bind(title.unwrap_or(existing.title))
        .bind(req.description.unwrap_or(existing.description))
        .bind(status.unwrap_or(existing.status))
        .bind(priority.unwrap_or(existing.priority))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| TaskboardError::NotFound(format!("Task not found: {}", id)))?;

        if existing.status != task.status {
            tracing::debug!(
                task_id = id,
                from = existing.status.as_str(),
                to = task.status.as_str(),
                "Task status changed"
            );
        }

        Ok(task)
    }

    pub async fn update_task_status(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
        status: Status,
    ) -> Result<Task, TaskboardError> {
        Self::update_task(pool, user_id, id, UpdateTaskRequest::status_only(status)).await
    }

    /// Removes a task and returns it so callers can announce the deletion.
    pub async fn delete_task(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
    ) -> Result<Task, TaskboardError> {
        sqlx::query_as(&format!(
            "DELETE FROM tasks WHERE id = ? AND user_id = ? RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| TaskboardError::NotFound(format!("Task not found: {}", id)))
    }
}
