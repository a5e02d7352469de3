use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::api::dto::{BoardRequest, ListBoardsQuery};
use crate::domain::{Board, BoardSummary, PaginatedList, TaskboardError};

pub struct BoardService;

impl BoardService {
    pub async fn list_boards(
        pool: &SqlitePool,
        user_id: &str,
        query: ListBoardsQuery,
        page_size: i64,
    ) -> Result<PaginatedList<BoardSummary>, TaskboardError> {
        let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
        // Pages far past the end are just empty.
        let offset = (page - 1).saturating_mul(page_size);
        let title = query
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(|t| like_pattern(&t));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM boards WHERE user_id = ?1 AND (?2 IS NULL OR LOWER(title) LIKE LOWER(?2) ESCAPE '\\')",
        )
        .bind(user_id)
        .bind(title.as_deref())
        .fetch_one(pool)
        .await?;

        let boards: Vec<BoardSummary> = sqlx::query_as(
            r#"
            SELECT
                b.id, b.user_id, b.title, b.description, b.created_at,
                (SELECT COUNT(*) FROM tasks t WHERE t.board_id = b.id AND t.status = 'todo') as todo,
                (SELECT COUNT(*) FROM tasks t WHERE t.board_id = b.id AND t.status = 'in-progress') as in_progress,
                (SELECT COUNT(*) FROM tasks t WHERE t.board_id = b.id AND t.status = 'done') as done
            FROM boards b
            WHERE b.user_id = ?1 AND (?2 IS NULL OR LOWER(b.title) LIKE LOWER(?2) ESCAPE '\')
            ORDER BY b.created_at DESC, b.rowid DESC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(user_id)
        .bind(title.as_deref())
        .bind(page_size)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(PaginatedList {
            result: boards,
            total,
            page,
            page_size,
            has_more: offset.saturating_add(page_size) < total,
        })
    }

    pub async fn create_board(
        pool: &SqlitePool,
        user_id: &str,
        req: BoardRequest,
    ) -> Result<Board, TaskboardError> {
        let title = validate_title(&req.title)?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let board: Board = sqlx::query_as(
            "INSERT INTO boards (id, user_id, title, description, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id, user_id, title, description, created_at",
        )
        .bind(&id)
        .bind(user_id)
        .bind(title)
        .bind(req.description.unwrap_or_default())
        .bind(&now)
        .fetch_one(pool)
        .await?;

        tracing::debug!(board_id = board.id.as_str(), "Board created");
        Ok(board)
    }

    /// Looks a board up on behalf of its owner. Other users' boards are
    /// reported as missing.
    pub async fn get_board(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
    ) -> Result<Board, TaskboardError> {
        sqlx::query_as(
            "SELECT id, user_id, title, description, created_at FROM boards WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| TaskboardError::NotFound(format!("Board not found: {}", id)))
    }

    pub async fn update_board(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
        req: BoardRequest,
    ) -> Result<Board, TaskboardError> {
        let title = validate_title(&req.title)?;

        sqlx::query_as(
            "UPDATE boards SET title = ?, description = COALESCE(?, description) WHERE id = ? AND user_id = ? RETURNING id, user_id, title, description, created_at",
        )
        .bind(title)
        .bind(req.description)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| TaskboardError::NotFound(format!("Board not found: {}", id)))
    }

    pub async fn delete_board(
        pool: &SqlitePool,
        user_id: &str,
        id: &str,
    ) -> Result<(), TaskboardError> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskboardError::NotFound(format!("Board not found: {}", id)));
        }

        Ok(())
    }
}

fn validate_title(title: &str) -> Result<&str, TaskboardError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskboardError::BadRequest("Board title is required".into()));
    }
    Ok(title)
}

/// Substring pattern for `LIKE ... ESCAPE '\'` that matches `filter` literally.
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
