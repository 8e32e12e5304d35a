//! Authenticated-identity extractor for privileged routes.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use staffdesk_auth_types::bearer::bearer_token;
use staffdesk_auth_types::token::{SessionClaims, validate_session_token};
use staffdesk_domain::role::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity decoded from a validated `Authorization: Bearer` token.
///
/// Extraction performs the full signature/expiry check against the
/// state-held secret; a missing, malformed, or rejected token short-circuits
/// the handler with 401 before any privileged work runs. Role enforcement
/// (403) is done by handlers via [`Identity::require_owner`] /
/// [`Identity::require_employee`].
#[derive(Debug, Clone)]
pub struct Identity {
    pub claims: SessionClaims,
}

impl Identity {
    pub fn require_owner(&self) -> Result<(), ApiError> {
        if self.claims.role != Role::Owner {
            return Err(ApiError::Forbidden);
        }
        Ok(())
    }

    pub fn require_employee(&self) -> Result<(), ApiError> {
        if self.claims.role != Role::Employee {
            return Err(ApiError::Forbidden);
        }
        Ok(())
    }

    /// Subject of an employee token as a uid.
    pub fn employee_uid(&self) -> Result<Uuid, ApiError> {
        self.claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized)
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = bearer_token(&parts.headers)
            .ok_or(ApiError::Unauthorized)
            .and_then(|token| {
                validate_session_token(token, &state.jwt_secret).map_err(|_| ApiError::Unauthorized)
            });

        async move { result.map(|claims| Self { claims }) }
    }
}
