use std::time::Duration;

use rand::RngCore;
use serde::Deserialize;

const DEFAULT_PAGE_SIZE: i64 = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub frontend_dir: String,
    pub cors_origin: String,
    pub cookie_secure: bool,
    pub jwt_secret: String,
    pub board_page_size: i64,
    /// How long a client-side `ReorderController` waits for the backend to
    /// accept a column change. The server itself never reads it.
    pub reorder_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, sessions will not survive a restart");
                random_secret()
            }
        };

        let board_page_size = page_size_from(std::env::var("BOARD_PAGE_SIZE").ok().as_deref());

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(21547),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:taskboard.db".into()),
            frontend_dir: std::env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| "../frontend/dist".into()),
            cors_origin: std::env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:21548,http://127.0.0.1:21548".into()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            jwt_secret,
            board_page_size,
            reorder_timeout_ms: std::env::var("REORDER_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        })
    }

    pub fn reorder_timeout(&self) -> Duration {
        Duration::from_millis(self.reorder_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 21547,
            database_url: "sqlite:taskboard.db".into(),
            frontend_dir: "../frontend/dist".into(),
            cors_origin: "http://localhost:21548,http://127.0.0.1:21548".into(),
            cookie_secure: false,
            jwt_secret: random_secret(),
            board_page_size: DEFAULT_PAGE_SIZE,
            reorder_timeout_ms: 10_000,
        }
    }
}

fn page_size_from(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_PAGE_SIZE;
    };
    match raw.trim().parse::<i64>() {
        Ok(size) if size >= 1 => size,
        _ => {
            tracing::warn!(value = raw, "Invalid BOARD_PAGE_SIZE, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        }
    }
}

fn random_secret() -> String {
    let mut bytes = [0_u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
