use axum::{
    RequestPartsExt,
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| ApiError::Unauthorized("Bearer token is required".to_string()))?;

    Ok(bearer.token().to_string())
}

/// Guards administration routes with the configured static token.
pub async fn admin_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state
        .args
        .server
        .admin_token
        .as_deref()
        .filter(|token| !token.is_empty())
    else {
        return Err(ApiError::Forbidden(
            "administration is disabled on this instance".to_string(),
        ));
    };

    let (mut parts, body) = req.into_parts();
    let token = extract_token_from_bearer(&mut parts).await?;

    if !tokens_match(token.as_bytes(), expected.as_bytes()) {
        warn!(uri = %parts.uri, "rejected admin call with an invalid token");
        return Err(ApiError::Unauthorized("invalid admin token".to_string()));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Comparison time does not depend on where the first mismatch is.
fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    given.ct_eq(expected).into()
}
