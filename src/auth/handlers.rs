use axum::{
    body::Body,
    extract::{Extension, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::api::state::AppState;
use crate::auth::{cookies, middleware::AuthUser};
use crate::domain::{TaskboardError, User};

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<User>, TaskboardError> {
    let db = state.require_db()?;

    let user: User = sqlx::query_as(
        "SELECT id, email, first_name, last_name, created_at FROM users WHERE id = ?",
    )
    .bind(&auth_user.user_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| TaskboardError::NotFound("User not found".into()))?;

    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> Result<Response, TaskboardError> {
    let clear_cookie =
        cookies::build_clear_cookie(cookies::TOKEN_COOKIE, state.config.cookie_secure);

    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::SET_COOKIE, clear_cookie)
        .body(Body::empty())
        .map_err(|e| TaskboardError::Internal(format!("Failed to build logout response: {}", e)))
}
