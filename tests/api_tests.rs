mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use taskboard::domain::BoardEvent;

async fn create_board(app: axum::Router, token: &str, title: &str) -> Value {
    let (status, body) = common::make_request(
        app,
        "POST",
        "/api/boards",
        Some(json!({ "title": title, "description": "desc" }).to_string()),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    serde_json::from_str(&body).unwrap()
}

async fn create_task(app: axum::Router, token: &str, board_id: &str, body: Value) -> Value {
    let (status, body) = common::make_request(
        app,
        "POST",
        &format!("/api/boards/{}/tasks", board_id),
        Some(body.to_string()),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(common::test_state(pool));

    let (status, body) = common::make_request(app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_missing_session_is_rejected_and_cookie_cleared() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(common::test_state(pool));

    let (status, cookies, _) =
        common::make_request_with_headers(app.clone(), "GET", "/api/boards", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(cookies.iter().any(|c| c.starts_with("token=;") && c.contains("Max-Age=0")));

    let (status, _) =
        common::make_request(app, "GET", "/api/boards", None, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "bearer@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let request = axum::http::Request::builder()
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_and_logout() {
    let pool = common::setup_test_db().await;
    let (user_id, token) = common::create_user(&pool, "me@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let (status, body) =
        common::make_request(app.clone(), "GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let user: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(user["id"], user_id.as_str());
    assert_eq!(user["email"], "me@example.com");

    let (status, cookies, _) = common::make_request_with_headers(
        app,
        "POST",
        "/api/auth/logout",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(cookies.iter().any(|c| c.starts_with("token=;")));
}

#[tokio::test]
async fn test_board_crud() {
    let pool = common::setup_test_db().await;
    let (user_id, token) = common::create_user(&pool, "crud@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let board = create_board(app.clone(), &token, "Roadmap").await;
    assert_eq!(board["title"], "Roadmap");
    assert_eq!(board["user_id"], user_id.as_str());
    let board_id = board["id"].as_str().unwrap();

    let (status, body) = common::make_request(
        app.clone(),
        "PATCH",
        &format!("/api/boards/{}", board_id),
        Some(json!({ "title": "Roadmap 2" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(updated["title"], "Roadmap 2");
    assert_eq!(updated["description"], "desc");

    let (status, _) = common::make_request(
        app.clone(),
        "DELETE",
        &format!("/api/boards/{}", board_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::make_request(
        app,
        "GET",
        &format!("/api/boards/{}", board_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_board_title_is_rejected() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "blank@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let (status, body) = common::make_request(
        app,
        "POST",
        "/api/boards",
        Some(json!({ "title": "   " }).to_string()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["status"], 400);
}

#[tokio::test]
async fn test_boards_are_private_to_their_owner() {
    let pool = common::setup_test_db().await;
    let (_, owner) = common::create_user(&pool, "owner@example.com").await;
    let (_, other) = common::create_user(&pool, "other@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let board = create_board(app.clone(), &owner, "Secret").await;
    let board_id = board["id"].as_str().unwrap();
    let task = create_task(app.clone(), &owner, board_id, json!({ "title": "T" })).await;
    let task_id = task["id"].as_str().unwrap();

    for (method, uri) in [
        ("GET", format!("/api/boards/{}", board_id)),
        ("GET", format!("/api/boards/{}/tasks", board_id)),
        ("DELETE", format!("/api/boards/{}", board_id)),
        ("GET", format!("/api/tasks/{}", task_id)),
    ] {
        let (status, _) = common::make_request(app.clone(), method, &uri, None, Some(&other)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
    }

    let (status, _) = common::make_request(
        app.clone(),
        "PATCH",
        &format!("/api/tasks/{}", task_id),
        Some(json!({ "status": "done" }).to_string()),
        Some(&other),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = common::make_request(app, "GET", "/api/boards", None, Some(&other)).await;
    let page: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_board_listing_is_paginated_and_filterable() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "pages@example.com").await;
    let app = common::test_app(common::test_state(pool));

    for i in 0..8 {
        let title = if i % 2 == 0 { format!("Sprint {}", i) } else { format!("Ops {}", i) };
        create_board(app.clone(), &token, &title).await;
    }

    let (status, body) =
        common::make_request(app.clone(), "GET", "/api/boards", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let first: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(first["page"], 1);
    assert_eq!(first["page_size"], 6);
    assert_eq!(first["total"], 8);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["result"].as_array().unwrap().len(), 6);
    assert_eq!(first["result"][0]["title"], "Ops 7");

    let (_, body) =
        common::make_request(app.clone(), "GET", "/api/boards?page=2", None, Some(&token)).await;
    let second: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(second["result"].as_array().unwrap().len(), 2);
    assert_eq!(second["has_more"], false);

    let (_, body) = common::make_request(
        app,
        "GET",
        "/api/boards?page=1&title=sprint",
        None,
        Some(&token),
    )
    .await;
    let filtered: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(filtered["total"], 4);
    assert!(filtered["result"]
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["title"].as_str().unwrap().starts_with("Sprint")));
}

#[tokio::test]
async fn test_out_of_range_pages_are_clamped() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "far@example.com").await;
    let app = common::test_app(common::test_state(pool));
    create_board(app.clone(), &token, "Only board").await;

    let (status, body) =
        common::make_request(app.clone(), "GET", "/api/boards?page=0", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let zero: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(zero["page"], 1);
    assert_eq!(zero["result"][0]["title"], "Only board");

    let (status, body) = common::make_request(
        app,
        "GET",
        "/api/boards?page=9223372036854775807",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let far: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(far["page"], i64::MAX);
    assert_eq!(far["total"], 1);
    assert_eq!(far["has_more"], false);
    assert!(far["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_title_filter_matches_wildcards_literally() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "literal@example.com").await;
    let app = common::test_app(common::test_state(pool));
    for title in ["50% done", "500 tasks", "snake_case", "snakeXcase"] {
        create_board(app.clone(), &token, title).await;
    }

    let (_, body) = common::make_request(
        app.clone(),
        "GET",
        "/api/boards?title=50%25",
        None,
        Some(&token),
    )
    .await;
    let percent: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(percent["total"], 1);
    assert_eq!(percent["result"][0]["title"], "50% done");

    let (_, body) =
        common::make_request(app, "GET", "/api/boards?title=e_c", None, Some(&token)).await;
    let underscore: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(underscore["total"], 1);
    assert_eq!(underscore["result"][0]["title"], "snake_case");
}

#[tokio::test]
async fn test_board_summary_counts_tasks_per_column() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "counts@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let board = create_board(app.clone(), &token, "Counts").await;
    let board_id = board["id"].as_str().unwrap();
    for status in ["todo", "todo", "in-progress", "done", "done", "done"] {
        create_task(app.clone(), &token, board_id, json!({ "title": "t", "status": status })).await;
    }

    let (_, body) = common::make_request(app, "GET", "/api/boards", None, Some(&token)).await;
    let page: Value = serde_json::from_str(&body).unwrap();
    let summary = &page["result"][0];
    assert_eq!(summary["todo"], 2);
    assert_eq!(summary["in_progress"], 1);
    assert_eq!(summary["done"], 3);
}

#[tokio::test]
async fn test_fetch_tasks_groups_columns_newest_first() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "columns@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let board = create_board(app.clone(), &token, "Columns").await;
    let board_id = board["id"].as_str().unwrap();
    let older = create_task(app.clone(), &token, board_id, json!({ "title": "older" })).await;
    let newer = create_task(app.clone(), &token, board_id, json!({ "title": "newer" })).await;
    create_task(
        app.clone(),
        &token,
        board_id,
        json!({ "title": "shipped", "status": "done", "priority": "high" }),
    )
    .await;

    let (status, body) = common::make_request(
        app,
        "GET",
        &format!("/api/boards/{}/tasks", board_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["board"]["id"], board_id);
    let columns = view["columns"].as_array().unwrap();
    let ids: Vec<_> = columns.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["todo", "in-progress", "done"]);
    assert_eq!(columns[0]["title"], "To do");

    let todo = columns[0]["tasks"].as_array().unwrap();
    assert_eq!(todo[0]["id"], newer["id"]);
    assert_eq!(todo[1]["id"], older["id"]);
    assert!(columns[1]["tasks"].as_array().unwrap().is_empty());
    assert_eq!(columns[2]["tasks"][0]["priority"], "high");
}

#[tokio::test]
async fn test_task_defaults_and_validation() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "tasks@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let board = create_board(app.clone(), &token, "Tasks").await;
    let board_id = board["id"].as_str().unwrap();

    let task = create_task(app.clone(), &token, board_id, json!({ "title": "Write docs" })).await;
    assert_eq!(task["status"], "todo");
    assert_eq!(task["priority"], "low");
    assert_eq!(task["board_id"], board_id);

    let (status, _) = common::make_request(
        app.clone(),
        "POST",
        &format!("/api/boards/{}/tasks", board_id),
        Some(json!({ "title": "x", "priority": "urgent" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::make_request(
        app,
        "PATCH",
        &format!("/api/tasks/{}", task["id"].as_str().unwrap()),
        Some(json!({ "status": "in_progress" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_task() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "edit@example.com").await;
    let app = common::test_app(common::test_state(pool));

    let board = create_board(app.clone(), &token, "Edit").await;
    let board_id = board["id"].as_str().unwrap();
    let task = create_task(app.clone(), &token, board_id, json!({ "title": "Draft" })).await;
    let task_id = task["id"].as_str().unwrap();

    let (status, body) = common::make_request(
        app.clone(),
        "PATCH",
        &format!("/api/tasks/{}", task_id),
        Some(json!({ "status": "in-progress", "priority": "medium" }).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(updated["status"], "in-progress");
    assert_eq!(updated["priority"], "medium");
    assert_eq!(updated["title"], "Draft");

    let (status, _) = common::make_request(
        app.clone(),
        "DELETE",
        &format!("/api/tasks/{}", task_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::make_request(
        app,
        "GET",
        &format!("/api/tasks/{}", task_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_board_removes_its_tasks() {
    let pool = common::setup_test_db().await;
    let (_, token) = common::create_user(&pool, "cascade@example.com").await;
    let app = common::test_app(common::test_state(pool.clone()));

    let board = create_board(app.clone(), &token, "Doomed").await;
    let board_id = board["id"].as_str().unwrap();
    create_task(app.clone(), &token, board_id, json!({ "title": "a" })).await;
    create_task(app.clone(), &token, board_id, json!({ "title": "b" })).await;

    let (status, _) = common::make_request(
        app,
        "DELETE",
        &format!("/api/boards/{}", board_id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE board_id = ?")
        .bind(board_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_changes_are_published_as_events() {
    let pool = common::setup_test_db().await;
    let (user_id, token) = common::create_user(&pool, "events@example.com").await;
    let state = common::test_state(pool);
    let mut events = state.events_tx.subscribe();
    let app = common::test_app(state);

    let board = create_board(app.clone(), &token, "Live").await;
    let board_id = board["id"].as_str().unwrap();
    let task = create_task(app.clone(), &token, board_id, json!({ "title": "ping" })).await;

    common::make_request(
        app,
        "DELETE",
        &format!("/api/tasks/{}", task["id"].as_str().unwrap()),
        None,
        Some(&token),
    )
    .await;

    match events.recv().await.unwrap() {
        BoardEvent::BoardCreated { board } => assert_eq!(board.id, board_id),
        other => panic!("unexpected event {:?}", other),
    }
    match events.recv().await.unwrap() {
        BoardEvent::TaskCreated { task } => assert_eq!(task.title, "ping"),
        other => panic!("unexpected event {:?}", other),
    }
    let deleted = events.recv().await.unwrap();
    assert_eq!(deleted.user_id(), user_id);
    assert!(matches!(deleted, BoardEvent::TaskDeleted { .. }));
}
