use axum::extract::{Path, State};
use inciscope_core::domain::quota::ports::QuotaService;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    put,
    path = "/{user_id}",
    tag = "subscription",
    summary = "Grant a subscription",
    description = "Lifts every daily limit for the user. Idempotent.",
    responses(
        (status = 204, description = "Subscription active"),
        (status = 401, body = ErrorResponse),
        (status = 500, description = "Quota store unreachable", body = ErrorResponse)
    ),
    params(
        ("user_id" = String, Path, description = "User identifier"),
    ),
    security(("bearer" = []))
)]
pub async fn grant_subscription(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .grant_subscription(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
