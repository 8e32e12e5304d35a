use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
///
/// Every variant maps to a `{"success": false, "message": ...}` body so the
/// dashboard handles all failures uniformly; no internal detail leaks.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("no active access code; request a new one")]
    ChallengeNotFound,
    #[error("access code expired; request a new one")]
    ChallengeExpired,
    #[error("invalid access code")]
    InvalidCode,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("this email is already registered")]
    EmailTaken,
    #[error("password is too weak; must be at least 6 characters")]
    WeakPassword,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::ChallengeExpired | Self::WeakPassword => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCode | Self::InvalidCredentials | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ChallengeNotFound | Self::EmployeeNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
