use axum::{Extension, extract::State};
use inciscope_core::domain::quota::{entities::QuotaStatus, ports::QuotaService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    user_middleware::UserContext,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetQuotaResponse {
    pub data: QuotaStatus,
}

#[utoipa::path(
    get,
    path = "",
    tag = "quota",
    summary = "Get today's quota usage",
    description = "Counters for the current UTC day. `degraded` is true while the quota store is unreachable and checks fail open.",
    responses(
        (status = 200, body = GetQuotaResponse)
    ),
    params(
        ("X-User-Id" = String, Header, description = "Caller identifier"),
    )
)]
pub async fn get_quota(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Response<GetQuotaResponse>, ApiError> {
    let status = state.service.quota_status(&user.user_id).await;

    Ok(Response::OK(GetQuotaResponse { data: status }))
}
