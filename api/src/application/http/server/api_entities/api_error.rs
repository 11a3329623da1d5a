use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inciscope_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// The composition text did not contain a single ingredient.
    #[error("{0}")]
    UnprocessableEntity(String),

    /// Carries the user-facing upsell message.
    #[error("{0}")]
    TooManyRequests(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "E_FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::UnprocessableEntity(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E_PARSE"),
            ApiError::TooManyRequests(_) => (StatusCode::TOO_MANY_REQUESTS, "E_QUOTA_EXCEEDED"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Parse => ApiError::UnprocessableEntity(error.to_string()),
            CoreError::QuotaExceeded { message } => ApiError::TooManyRequests(message),
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::NotFound => ApiError::NotFound("resource not found".to_string()),
            other => {
                error!(error = %other, "request failed");
                ApiError::InternalServerError("internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::BadRequest(errors.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_http_statuses() {
        let cases = [
            (CoreError::Parse, StatusCode::UNPROCESSABLE_ENTITY),
            (CoreError::quota_exceeded(), StatusCode::TOO_MANY_REQUESTS),
            (CoreError::Invalid("bad".into()), StatusCode::BAD_REQUEST),
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (
                CoreError::BackingStoreUnavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CoreError::KnowledgeBaseLoad("missing".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (core_error, expected) in cases {
            let (status, _) = ApiError::from(core_error).status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_quota_error_keeps_upsell_message() {
        let api_error = ApiError::from(CoreError::quota_exceeded());

        match api_error {
            ApiError::TooManyRequests(message) => assert!(message.contains("подписку")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let api_error = ApiError::from(CoreError::BackingStoreUnavailable(
            "redis://secret-host".into(),
        ));

        assert_eq!(
            api_error,
            ApiError::InternalServerError("internal server error".to_string())
        );
    }
}
