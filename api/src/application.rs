pub mod auth;
pub mod http;
pub mod user_middleware;
