use axum::{extract::Request, middleware::Next, response::Response};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
const MAX_USER_ID_LEN: usize = 128;

/// Caller identity stored in request extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

/// Requires a non-empty `X-User-Id` header and exposes it as [`UserContext`].
pub async fn user_middleware(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("X-User-Id header is required".to_string()))?;

    if user_id.len() > MAX_USER_ID_LEN {
        return Err(ApiError::BadRequest(format!(
            "X-User-Id must be at most {MAX_USER_ID_LEN} bytes"
        )));
    }

    req.extensions_mut().insert(UserContext { user_id });

    Ok(next.run(req).await)
}
