use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeCompositionRequest {
    /// Label text. Absent when OCR produced nothing.
    #[validate(length(max = 20000, message = "text_input must be at most 20000 characters"))]
    pub text_input: Option<String>,
    #[validate(length(min = 1, max = 500, message = "goal must be between 1 and 500 characters"))]
    pub goal: String,
    #[schema(example = "skin")]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "subtype must be at most 100 characters"))]
    pub subtype: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct NormalizeCompositionRequest {
    #[validate(length(min = 1, max = 20000, message = "text_input must be between 1 and 20000 characters"))]
    pub text_input: String,
}
