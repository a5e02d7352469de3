pub mod cookies;
pub mod handlers;
pub mod jwt;
pub mod middleware;

pub use middleware::AuthUser;
