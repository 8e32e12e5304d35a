//! HTTP implementation of the verification port.

use serde::Deserialize;

use crate::session::VerifyPort;

/// Verifies tokens against the API service's `POST /api/verify-token`.
#[derive(Clone)]
pub struct HttpVerifyPort {
    base_url: String,
    http: reqwest::Client,
}

impl HttpVerifyPort {
    /// `base_url` is the API origin, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct VerifyTokenResponse {
    success: bool,
}

impl VerifyPort for HttpVerifyPort {
    async fn verify(&self, token: &str) -> Result<bool, anyhow::Error> {
        let url = format!("{}/api/verify-token", self.base_url);
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;

        // Rejections come back as 401/404 with a `{success: false, ...}` body;
        // read the body on every status rather than failing on non-2xx.
        let body: VerifyTokenResponse = response.json().await?;
        Ok(body.success)
    }
}
