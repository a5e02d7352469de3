pub mod api;
pub mod auth;
pub mod board;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
