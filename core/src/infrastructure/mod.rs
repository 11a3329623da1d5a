pub mod enrichment;
pub mod knowledge_base;
pub mod quota;
