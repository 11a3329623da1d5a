use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Process is up")
    )
)]
pub async fn live() -> StatusCode {
    StatusCode::OK
}
