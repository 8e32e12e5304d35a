/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL.
    pub redis_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Origin of the dashboard, used in emailed setup links. Env var:
    /// `DASHBOARD_ORIGIN`.
    pub dashboard_origin: String,
    /// TCP port to listen on (default 5000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Twilio credentials for owner-flow SMS.
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_from_number: String,
    /// SendGrid credentials for employee-flow and welcome email.
    pub sendgrid_api_key: String,
    pub email_from: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            dashboard_origin: std::env::var("DASHBOARD_ORIGIN").expect("DASHBOARD_ORIGIN"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            twilio_account_sid: std::env::var("TWILIO_ACCOUNT_SID").expect("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: std::env::var("TWILIO_AUTH_TOKEN").expect("TWILIO_AUTH_TOKEN"),
            twilio_from_number: std::env::var("TWILIO_FROM_NUMBER").expect("TWILIO_FROM_NUMBER"),
            sendgrid_api_key: std::env::var("SENDGRID_API_KEY").expect("SENDGRID_API_KEY"),
            email_from: std::env::var("EMAIL_FROM").expect("EMAIL_FROM"),
        }
    }
}
