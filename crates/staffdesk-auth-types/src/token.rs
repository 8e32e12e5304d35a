//! Session-token claims and JWT validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_API_SERVICE", test))]
use serde::Serialize;

use staffdesk_domain::role::Role;

/// Owner session lifetime in seconds (1 hour).
///
/// Owner sessions are treated as higher privilege and are deliberately
/// shorter lived than employee sessions.
pub const OWNER_TOKEN_EXP: u64 = 3600;

/// Employee session lifetime in seconds (8 hours).
pub const EMPLOYEE_TOKEN_EXP: u64 = 28800;

/// Errors returned by [`validate_session_token`] and [`decode_unverified`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token creation (API service) and validation
/// (API service, clients).
///
/// # Fields
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | phone number (owner) or employee uid (employee) |
/// | `email` | custom | employee email; absent on owner tokens |
/// | `role` | custom | see [`staffdesk_domain::role::Role`] |
/// | `iat` | `iat` | issuance timestamp, seconds since epoch |
/// | `exp` | `exp` | expiration timestamp, seconds since epoch |
///
/// # Feature gate
///
/// [`Deserialize`] is always available — all consumers validate or decode
/// tokens. [`Serialize`] requires the **`USE_ONLY_IN_API_SERVICE`** cargo
/// feature. Only the API service enables it because it is the sole token
/// issuer.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_API_SERVICE", test), derive(Serialize))]
pub struct SessionClaims {
    /// Subject identity: phone number (owner) or employee uid (employee).
    pub sub: String,
    /// Employee email; `None` on owner tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Session role.
    pub role: Role,
    /// Issuance timestamp (seconds since UNIX epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Validate a session token: HS256 signature + expiry against the shared
/// secret, returning the decoded claims.
///
/// This is the single validation routine behind every verification path —
/// the `/api/verify-token` endpoint, the bearer-token extractor on
/// privileged routes, and boot-time re-authentication all call through
/// here, so their signature/expiry behavior cannot drift apart.
///
/// Validation: HS256, `exp` checked, required claims `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between issuer and verifier.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Decode claims WITHOUT verifying signature or expiry.
///
/// For client-side use only: after the server has verified a token (or has
/// just issued one), the client reads the claims locally instead of round
/// tripping again. Never make an authorization decision from this — that is
/// what [`validate_session_token`] is for.
pub fn decode_unverified(token: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["sub"]);

    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|_| AuthError::Malformed)?;

    Ok(data.claims)
}
