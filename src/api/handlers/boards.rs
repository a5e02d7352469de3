use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{BoardRequest, ListBoardsQuery};
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::domain::{Board, BoardEvent, BoardSummary, PaginatedList, TaskboardError};
use crate::services::BoardService;

pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListBoardsQuery>,
) -> Result<Json<PaginatedList<BoardSummary>>, TaskboardError> {
    let db = state.require_db()?;
    let boards =
        BoardService::list_boards(db, &auth_user.user_id, query, state.config.board_page_size)
            .await?;
    Ok(Json(boards))
}

pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<BoardRequest>,
) -> Result<(StatusCode, Json<Board>), TaskboardError> {
    let db = state.require_db()?;
    let board = BoardService::create_board(db, &auth_user.user_id, req).await?;

    state.publish(BoardEvent::BoardCreated {
        board: board.clone(),
    });

    Ok((StatusCode::CREATED, Json(board)))
}

pub async fn get_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Board>, TaskboardError> {
    let db = state.require_db()?;
    let board = BoardService::get_board(db, &auth_user.user_id, &id).await?;
    Ok(Json(board))
}

pub async fn update_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<BoardRequest>,
) -> Result<Json<Board>, TaskboardError> {
    let db = state.require_db()?;
    let board = BoardService::update_board(db, &auth_user.user_id, &id, req).await?;

    state.publish(BoardEvent::BoardUpdated {
        board: board.clone(),
    });

    Ok(Json(board))
}

pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, TaskboardError> {
    let db = state.require_db()?;
    BoardService::delete_board(db, &auth_user.user_id, &id).await?;

    state.publish(BoardEvent::BoardDeleted {
        user_id: auth_user.user_id,
        board_id: id,
    });

    Ok(StatusCode::NO_CONTENT)
}
