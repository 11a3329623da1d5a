use axum::extract::State;
use inciscope_core::domain::{
    composition::ports::CompositionService, ingredient::entities::IngredientKey,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    composition::validators::NormalizeCompositionRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NormalizeCompositionResponse {
    pub ingredients: Vec<IngredientKey>,
}

#[utoipa::path(
    post,
    path = "/normalize",
    tag = "composition",
    summary = "Preview ingredient normalization",
    description = "Returns the canonical ingredient keys extracted from the text. Not charged against any quota.",
    responses(
        (status = 200, body = NormalizeCompositionResponse)
    ),
    request_body = NormalizeCompositionRequest
)]
pub async fn normalize_composition(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<NormalizeCompositionRequest>,
) -> Result<Response<NormalizeCompositionResponse>, ApiError> {
    let ingredients = state.service.normalize(&payload.text_input);

    Ok(Response::OK(NormalizeCompositionResponse { ingredients }))
}
