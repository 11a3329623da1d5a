use std::str::FromStr;

use axum::{Extension, extract::State};
use inciscope_core::domain::composition::{
    entities::{AnalysisOutcome, Category},
    ports::CompositionService,
    value_objects::AnalyzeCompositionInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        composition::validators::AnalyzeCompositionRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ErrorResponse, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
    user_middleware::UserContext,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeCompositionResponse {
    pub data: AnalysisOutcome,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "composition",
    summary = "Analyze a cosmetic composition",
    description = "Splits the ingredient list, resolves unknown ingredients when enrichment is enabled and returns a goal-aware report. Charged against the daily request quota.",
    responses(
        (status = 200, body = AnalyzeCompositionResponse),
        (status = 422, description = "No ingredient could be parsed", body = ErrorResponse),
        (status = 429, description = "Daily quota exhausted", body = ErrorResponse)
    ),
    params(
        ("X-User-Id" = String, Header, description = "Caller identifier"),
    ),
    request_body = AnalyzeCompositionRequest
)]
pub async fn analyze_composition(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    ValidateJson(payload): ValidateJson<AnalyzeCompositionRequest>,
) -> Result<Response<AnalyzeCompositionResponse>, ApiError> {
    let category = Category::from_str(&payload.category)?;

    let outcome = state
        .service
        .analyze(AnalyzeCompositionInput {
            text_input: payload.text_input,
            goal: payload.goal,
            category,
            subtype: payload.subtype,
            user_id: user.user_id,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeCompositionResponse { data: outcome }))
}
