pub mod composition;
pub mod health;
pub mod ingredient;
pub mod quota;
pub mod server;
pub mod subscription;
