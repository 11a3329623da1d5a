pub mod backend;
pub mod memory_store;
pub mod redis_store;

pub use backend::QuotaBackend;
pub use memory_store::MemoryQuotaStore;
pub use redis_store::RedisQuotaStore;
