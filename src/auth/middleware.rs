use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::state::AppState;
use crate::auth::{cookies, jwt};
use crate::domain::TaskboardError;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Rejects requests without a valid session. A rejected session also loses
/// its cookie so the browser goes back through sign-in.
pub async fn auth_middleware(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = extract_token(&req) else {
        return unauthorized(&state, "Missing session token");
    };

    let claims = match jwt::verify_token(state.config.jwt_secret.as_bytes(), &token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            return unauthorized(&state, "Invalid session token");
        }
    };

    req.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
    });

    next.run(req).await
}

fn unauthorized(state: &AppState, message: &str) -> Response {
    let clear = cookies::build_clear_cookie(cookies::TOKEN_COOKIE, state.config.cookie_secure);
    let mut response = TaskboardError::Unauthorized(message.into()).into_response();
    if let Ok(value) = clear.parse() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

fn extract_token(req: &Request) -> Option<String> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    auth_header.or_else(|| cookies::extract_cookie_value(req.headers(), cookies::TOKEN_COOKIE))
}
