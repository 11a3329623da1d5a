pub mod analyze_composition;
pub mod normalize_composition;
