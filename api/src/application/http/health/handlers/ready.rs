use axum::extract::State;
use inciscope_core::domain::ingredient::ports::IngredientService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuotaMode {
    /// Limits are enforced.
    Enforcing,
    /// The quota store is unreachable and every check is allowed.
    Degraded,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub knowledge_base_size: usize,
    pub quota_mode: QuotaMode,
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "A degraded quota store does not make the service unready.",
    responses(
        (status = 200, body = ReadinessResponse)
    )
)]
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Response<ReadinessResponse>, ApiError> {
    let quota_mode = if state.service.is_quota_degraded() {
        QuotaMode::Degraded
    } else {
        QuotaMode::Enforcing
    };

    Ok(Response::OK(ReadinessResponse {
        knowledge_base_size: state.service.knowledge_base_size(),
        quota_mode,
    }))
}
