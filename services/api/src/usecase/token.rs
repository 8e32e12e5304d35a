use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use staffdesk_auth_types::token::{
    EMPLOYEE_TOKEN_EXP, OWNER_TOKEN_EXP, SessionClaims, validate_session_token,
};
use staffdesk_domain::role::Role;

use crate::domain::password::verify_password;
use crate::domain::repository::{ChallengeStore, EmployeeRepository};
use crate::domain::types::FlowType;
use crate::error::ApiError;
use crate::usecase::challenge::consume_challenge;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn sign(claims: &SessionClaims, secret: &str) -> Result<String, ApiError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

/// Mint an owner session token (1 hour).
pub fn issue_owner_token(phone_number: &str, secret: &str) -> Result<(String, u64), ApiError> {
    let now = now_secs();
    let exp = now + OWNER_TOKEN_EXP;
    let claims = SessionClaims {
        sub: phone_number.to_owned(),
        email: None,
        role: Role::Owner,
        iat: now,
        exp,
    };
    Ok((sign(&claims, secret)?, exp))
}

/// Mint an employee session token (8 hours).
pub fn issue_employee_token(
    uid: Uuid,
    email: &str,
    secret: &str,
) -> Result<(String, u64), ApiError> {
    let now = now_secs();
    let exp = now + EMPLOYEE_TOKEN_EXP;
    let claims = SessionClaims {
        sub: uid.to_string(),
        email: Some(email.to_owned()),
        role: Role::Employee,
        iat: now,
        exp,
    };
    Ok((sign(&claims, secret)?, exp))
}

// ── OwnerLogin ───────────────────────────────────────────────────────────────

pub struct OwnerLoginInput {
    pub phone_number: String,
    pub code: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub token_exp: u64,
}

pub struct OwnerLoginUseCase<C: ChallengeStore> {
    pub challenges: C,
    pub jwt_secret: String,
}

impl<C: ChallengeStore> OwnerLoginUseCase<C> {
    pub async fn execute(&self, input: OwnerLoginInput) -> Result<LoginOutput, ApiError> {
        consume_challenge(
            &self.challenges,
            &input.phone_number,
            FlowType::OwnerPhone,
            &input.code,
        )
        .await?;

        let (token, token_exp) = issue_owner_token(&input.phone_number, &self.jwt_secret)?;
        Ok(LoginOutput { token, token_exp })
    }
}

// ── EmployeeLogin (OTP) ──────────────────────────────────────────────────────

pub struct EmployeeLoginInput {
    pub email: String,
    pub code: String,
}

pub struct EmployeeLoginUseCase<C: ChallengeStore> {
    pub challenges: C,
    pub jwt_secret: String,
}

impl<C: ChallengeStore> EmployeeLoginUseCase<C> {
    pub async fn execute(&self, input: EmployeeLoginInput) -> Result<LoginOutput, ApiError> {
        let challenge = consume_challenge(
            &self.challenges,
            &input.email,
            FlowType::EmployeeEmail,
            &input.code,
        )
        .await?;

        // Employee challenges always carry the uid captured at issuance.
        let uid = challenge
            .employee_uid
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("employee challenge missing uid")))?;

        let (token, token_exp) = issue_employee_token(uid, &input.email, &self.jwt_secret)?;
        Ok(LoginOutput { token, token_exp })
    }
}

// ── PasswordLogin ────────────────────────────────────────────────────────────

pub struct PasswordLoginInput {
    pub email: String,
    pub password: String,
}

pub struct PasswordLoginUseCase<E: EmployeeRepository> {
    pub employees: E,
    pub jwt_secret: String,
}

impl<E: EmployeeRepository> PasswordLoginUseCase<E> {
    /// Unknown email, no password set, and hash mismatch all collapse into
    /// one answer so the endpoint does not leak which emails exist.
    pub async fn execute(&self, input: PasswordLoginInput) -> Result<LoginOutput, ApiError> {
        let employee = self
            .employees
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let hash = employee
            .password_hash
            .as_deref()
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&input.password, hash) {
            return Err(ApiError::InvalidCredentials);
        }

        let (token, token_exp) =
            issue_employee_token(employee.id, &employee.email, &self.jwt_secret)?;
        Ok(LoginOutput { token, token_exp })
    }
}

// ── VerifyToken ──────────────────────────────────────────────────────────────

pub struct VerifyTokenUseCase<E: EmployeeRepository> {
    pub employees: E,
    pub jwt_secret: String,
}

impl<E: EmployeeRepository> VerifyTokenUseCase<E> {
    /// Signature + expiry via the shared routine, then an existence check
    /// for employee subjects — a token must die with its employee record.
    /// Owner subjects are not pre-registered, so the claims alone suffice.
    pub async fn execute(&self, token: &str) -> Result<SessionClaims, ApiError> {
        let claims =
            validate_session_token(token, &self.jwt_secret).map_err(|_| ApiError::Unauthorized)?;

        if claims.role == Role::Employee {
            let uid = claims
                .sub
                .parse::<Uuid>()
                .map_err(|_| ApiError::Unauthorized)?;
            self.employees
                .find_by_id(uid)
                .await?
                .ok_or(ApiError::EmployeeNotFound)?;
        }

        Ok(claims)
    }
}
