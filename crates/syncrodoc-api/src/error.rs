use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use syncrodoc_db::StoreError;
use syncrodoc_types::api::ErrorResponse;

/// Request-boundary error taxonomy. Every variant renders as
/// `(status, {"message": ...})`; the messages for credential and token
/// failures are deliberately generic so responses cannot be used to
/// enumerate which usernames or emails exist.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    /// Which of the two fields collided is not revealed.
    #[error("Username or email already in use")]
    DuplicateIdentity,

    /// Identical wording for unknown identity and wrong password.
    #[error("Invalid username/email or password")]
    InvalidCredentials,

    /// Covers missing, malformed, tampered and expired tokens alike.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Too many requests, please try again later")]
    RateExceeded { retry_after: u64 },

    #[error("store failure")]
    Store(#[source] StoreError),

    #[error("internal error")]
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::DuplicateIdentity,
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::DuplicateIdentity => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidCredentials | ApiError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::RateExceeded { retry_after } => {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, retry_after.to_string())],
                    Json(ErrorResponse {
                        message: self.to_string(),
                    }),
                )
                    .into_response();
            }
            ApiError::Store(err) => {
                // The only case logged with full detail; the client still
                // gets a generic body.
                error!(error = %err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
