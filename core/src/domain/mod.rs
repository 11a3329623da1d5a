pub mod common;
pub mod composition;
pub mod enrichment;
pub mod ingredient;
pub mod quota;
