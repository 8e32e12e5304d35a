//! Bearer-token header parsing.

use http::HeaderMap;

/// Pull the raw token out of `Authorization: Bearer <token>`.
///
/// Returns `None` if the header is absent, is not the Bearer scheme, or
/// carries an empty value. Signature/expiry validation happens after
/// extraction, where the verifying secret is available.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .filter(|s| !s.is_empty())
}
