use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::{Priority, Status};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Board {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

/// A board as listed on the dashboard, with per-column task counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BoardSummary {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub todo: i64,
    pub in_progress: i64,
    pub done: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    pub board_id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: Status,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn empty(id: Status) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            tasks: Vec::new(),
        }
    }
}

/// A board together with its tasks partitioned into status columns.
///
/// Columns always appear in [`Status::all`] order. Task order inside a column
/// is whatever the producer gave; the server sorts newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub board: Board,
    pub columns: Vec<Column>,
}

impl BoardView {
    pub fn from_tasks(board: Board, tasks: Vec<Task>) -> Self {
        let mut columns: Vec<Column> = Status::all().iter().copied().map(Column::empty).collect();

        for task in tasks {
            if let Some(column) = columns.iter_mut().find(|c| c.id == task.status) {
                column.tasks.push(task);
            }
        }

        Self { board, columns }
    }

    pub fn column(&self, status: Status) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == status)
    }

    pub fn column_mut(&mut self, status: Status) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == status)
    }

    pub fn task_ids(&self, status: Status) -> Vec<&str> {
        self.column(status)
            .map(|c| c.tasks.iter().map(|t| t.id.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedList<T> {
    pub result: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}
