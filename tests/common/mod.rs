#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower::ServiceExt;
use uuid::Uuid;

use taskboard::api::{create_router, AppState};
use taskboard::auth::jwt;
use taskboard::config::Config;
use taskboard::domain::BoardEvent;
use taskboard::infrastructure::db;

pub const TEST_SECRET: &str = "test-secret";

/// In-memory database with the real migrations. One connection, so every
/// query sees the same database.
pub async fn setup_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a user and returns `(user_id, session_token)`.
pub async fn create_user(pool: &SqlitePool, email: &str) -> (String, String) {
    let user_id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO users (id, email, first_name, last_name, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user_id)
    .bind(email)
    .bind("Test")
    .bind("User")
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await
    .expect("Failed to insert user");

    let token = jwt::create_token(TEST_SECRET.as_bytes(), &user_id).expect("token");
    (user_id, token)
}

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        frontend_dir: "../frontend/dist".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        cookie_secure: false,
        jwt_secret: TEST_SECRET.to_string(),
        board_page_size: 6,
        reorder_timeout_ms: 2_000,
    })
}

pub fn test_state(pool: SqlitePool) -> AppState {
    let (events_tx, _) = broadcast::channel::<BoardEvent>(100);
    AppState::new(Some(pool), events_tx, test_config())
}

pub fn test_app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    create_router(state, &config)
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
    token: Option<&str>,
) -> (StatusCode, String) {
    let (status, _, body) = make_request_with_headers(app, method, uri, body, token).await;
    (status, body)
}

/// Like [`make_request`] but also returns the `Set-Cookie` headers.
pub async fn make_request_with_headers(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
    token: Option<&str>,
) -> (StatusCode, Vec<String>, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    if let Some(token) = token {
        request = request.header("cookie", format!("token={}", token));
    }

    let request = request
        .body(Body::from(body.unwrap_or_default()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let cookies = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, cookies, body_str)
}
