pub mod entities;
pub mod knowledge_base;
pub mod ports;
pub mod services;

pub use entities::*;
pub use knowledge_base::{IngredientMap, KnowledgeBase, merge};
pub use ports::*;
