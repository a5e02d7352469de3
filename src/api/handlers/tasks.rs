use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{CreateTaskRequest, UpdateTaskRequest};
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::domain::{BoardEvent, BoardView, Task, TaskboardError};
use crate::services::TaskService;

pub async fn fetch_tasks(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardView>, TaskboardError> {
    let db = state.require_db()?;
    let view = TaskService::fetch_tasks(db, &auth_user.user_id, &board_id).await?;
    Ok(Json(view))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(board_id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), TaskboardError> {
    let db = state.require_db()?;
    let task = TaskService::create_task(db, &auth_user.user_id, &board_id, req).await?;

    state.publish(BoardEvent::TaskCreated { task: task.clone() });

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Task>, TaskboardError> {
    let db = state.require_db()?;
    let task = TaskService::get_task(db, &auth_user.user_id, &id).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, TaskboardError> {
    let db = state.require_db()?;
    let task = TaskService::update_task(db, &auth_user.user_id, &id, req).await?;

    state.publish(BoardEvent::TaskUpdated { task: task.clone() });

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, TaskboardError> {
    let db = state.require_db()?;
    let task = TaskService::delete_task(db, &auth_user.user_id, &id).await?;

    state.publish(BoardEvent::TaskDeleted {
        user_id: task.user_id,
        board_id: task.board_id,
        task_id: task.id,
    });

    Ok(StatusCode::NO_CONTENT)
}
