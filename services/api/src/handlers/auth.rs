use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use staffdesk_auth_types::token::SessionClaims;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::challenge::{
    IssueEmployeeChallengeInput, IssueEmployeeChallengeUseCase, IssueOwnerChallengeInput,
    IssueOwnerChallengeUseCase,
};
use crate::usecase::token::{
    EmployeeLoginInput, EmployeeLoginUseCase, OwnerLoginInput, OwnerLoginUseCase,
    PasswordLoginInput, PasswordLoginUseCase, VerifyTokenUseCase,
};

/// `{success, message}` acknowledgment. Issuance never echoes the code.
#[derive(Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `{success, message, token}` — token present only on successful login.
#[derive(Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub message: &'static str,
    pub token: String,
}

// Request fields are optional so a missing field produces the uniform 400
// body instead of a framework rejection.

fn required(field: Option<String>, name: &'static str) -> Result<String, ApiError> {
    field
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField(name))
}

// ── POST /api/owner/generate-access-code ─────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAccessCodeRequest {
    pub phone_number: Option<String>,
}

pub async fn generate_access_code(
    State(state): State<AppState>,
    Json(body): Json<GenerateAccessCodeRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let phone_number = required(body.phone_number, "phoneNumber")?;

    let usecase = IssueOwnerChallengeUseCase {
        challenges: state.challenge_store(),
        delivery: state.delivery(),
    };
    usecase
        .execute(IssueOwnerChallengeInput { phone_number })
        .await?;

    Ok(Json(StatusResponse {
        success: true,
        message: "OTP sent successfully",
    }))
}

// ── POST /api/owner/validate-access-code ─────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAccessCodeRequest {
    pub phone_number: Option<String>,
    pub access_code: Option<String>,
}

pub async fn validate_access_code(
    State(state): State<AppState>,
    Json(body): Json<ValidateAccessCodeRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let phone_number = required(body.phone_number, "phoneNumber")?;
    let code = required(body.access_code, "accessCode")?;

    let usecase = OwnerLoginUseCase {
        challenges: state.challenge_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(OwnerLoginInput { phone_number, code })
        .await?;

    Ok(Json(TokenResponse {
        success: true,
        message: "Access code validated successfully. You are logged in.",
        token: out.token,
    }))
}

// ── POST /api/employee/login-email ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEmailRequest {
    pub email: Option<String>,
}

pub async fn login_email(
    State(state): State<AppState>,
    Json(body): Json<LoginEmailRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let email = required(body.email, "email")?;

    let usecase = IssueEmployeeChallengeUseCase {
        employees: state.employee_repo(),
        challenges: state.challenge_store(),
        delivery: state.delivery(),
    };
    usecase.execute(IssueEmployeeChallengeInput { email }).await?;

    Ok(Json(StatusResponse {
        success: true,
        message: "OTP sent to your email.",
    }))
}

// ── POST /api/employee/validate-access-code ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateEmployeeAccessCodeRequest {
    pub email: Option<String>,
    pub access_code: Option<String>,
}

pub async fn validate_employee_access_code(
    State(state): State<AppState>,
    Json(body): Json<ValidateEmployeeAccessCodeRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = required(body.email, "email")?;
    let code = required(body.access_code, "accessCode")?;

    let usecase = EmployeeLoginUseCase {
        challenges: state.challenge_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(EmployeeLoginInput { email, code }).await?;

    Ok(Json(TokenResponse {
        success: true,
        message: "Access code validated successfully. You are logged in as employee.",
        token: out.token,
    }))
}

// ── POST /api/employee/login-password ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPasswordRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login_password(
    State(state): State<AppState>,
    Json(body): Json<LoginPasswordRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = required(body.email, "email")?;
    let password = required(body.password, "password")?;

    let usecase = PasswordLoginUseCase {
        employees: state.employee_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(PasswordLoginInput { email, password }).await?;

    Ok(Json(TokenResponse {
        success: true,
        message: "You are logged in as employee.",
        token: out.token,
    }))
}

// ── POST /api/verify-token ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyTokenRequest {
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub user: SessionClaims,
    pub message: &'static str,
}

/// Boot-time re-authentication path for clients holding a stored token.
/// Runs the same shared signature/expiry routine as the bearer extractor.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(body): Json<VerifyTokenRequest>,
) -> Result<Json<VerifyTokenResponse>, ApiError> {
    let token = body.token.ok_or(ApiError::Unauthorized)?;

    let usecase = VerifyTokenUseCase {
        employees: state.employee_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let claims = usecase.execute(&token).await?;

    Ok(Json(VerifyTokenResponse {
        success: true,
        user: claims,
        message: "Token is valid.",
    }))
}
