use chrono::{Duration, Utc};
use rand::RngExt;
use tracing::warn;

use crate::domain::repository::{ChallengeStore, CodeDelivery, EmployeeRepository};
use crate::domain::types::{CHALLENGE_TTL_SECS, Challenge, FlowType};
use crate::error::ApiError;

/// Generate a uniformly random 6-digit access code, zero-padded
/// (`000000`–`999999`).
fn generate_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..1_000_000u32))
}

fn build_challenge(subject: String, flow: FlowType, employee_uid: Option<uuid::Uuid>) -> Challenge {
    let now = Utc::now();
    Challenge {
        subject,
        code: generate_code(),
        flow,
        employee_uid,
        created_at: now,
        expires_at: now + Duration::seconds(CHALLENGE_TTL_SECS),
    }
}

// ── IssueOwnerChallenge ──────────────────────────────────────────────────────

pub struct IssueOwnerChallengeInput {
    pub phone_number: String,
}

pub struct IssueOwnerChallengeUseCase<C, D>
where
    C: ChallengeStore,
    D: CodeDelivery,
{
    pub challenges: C,
    pub delivery: D,
}

impl<C, D> IssueOwnerChallengeUseCase<C, D>
where
    C: ChallengeStore,
    D: CodeDelivery,
{
    /// Owner phone numbers are not pre-registered; any number may request a
    /// code. The code is never returned to the caller.
    pub async fn execute(&self, input: IssueOwnerChallengeInput) -> Result<(), ApiError> {
        let challenge = build_challenge(input.phone_number, FlowType::OwnerPhone, None);

        // Persist first; a stored-but-undelivered code stays redeemable.
        self.challenges.put(&challenge).await?;

        let body = format!("Your login OTP is: {}", challenge.code);
        if let Err(e) = self.delivery.send_sms(&challenge.subject, &body).await {
            warn!(subject = %challenge.subject, error = %e, "access code SMS delivery failed");
        }

        Ok(())
    }
}

// ── IssueEmployeeChallenge ───────────────────────────────────────────────────

pub struct IssueEmployeeChallengeInput {
    pub email: String,
}

pub struct IssueEmployeeChallengeUseCase<E, C, D>
where
    E: EmployeeRepository,
    C: ChallengeStore,
    D: CodeDelivery,
{
    pub employees: E,
    pub challenges: C,
    pub delivery: D,
}

impl<E, C, D> IssueEmployeeChallengeUseCase<E, C, D>
where
    E: EmployeeRepository,
    C: ChallengeStore,
    D: CodeDelivery,
{
    pub async fn execute(&self, input: IssueEmployeeChallengeInput) -> Result<(), ApiError> {
        // 1. Email must resolve to a known employee → 404 if not.
        let employee = self
            .employees
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::EmployeeNotFound)?;

        // 2. Persist the challenge, capturing the uid for token minting.
        let challenge = build_challenge(input.email, FlowType::EmployeeEmail, Some(employee.id));
        self.challenges.put(&challenge).await?;

        // 3. Deliver; failure is logged, not surfaced.
        let html = format!(
            "<p>Hello {},</p>\
             <p>Your One-Time Password (OTP) for logging into Staffdesk is:</p>\
             <p><strong>{}</strong></p>\
             <p>This OTP is valid for 5 minutes. Please do not share it with anyone.</p>\
             <p>If you did not request this, please ignore this email.</p>",
            employee.name, challenge.code
        );
        if let Err(e) = self
            .delivery
            .send_email(&challenge.subject, "Staffdesk - Your Login OTP", &html)
            .await
        {
            warn!(subject = %challenge.subject, error = %e, "access code email delivery failed");
        }

        Ok(())
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Consume a pending challenge: `Pending → {Validated, Expired}`, with a
/// self-loop on a wrong code.
///
/// In order:
/// 1. missing record or flow mismatch → [`ApiError::ChallengeNotFound`];
/// 2. past the deadline → record deleted, [`ApiError::ChallengeExpired`];
/// 3. wrong code (exact string equality) → [`ApiError::InvalidCode`], record
///    kept so the caller may retry until expiry;
/// 4. match → record deleted, challenge returned. A consumed challenge can
///    never validate again.
pub async fn consume_challenge<C: ChallengeStore>(
    challenges: &C,
    subject: &str,
    flow: FlowType,
    code: &str,
) -> Result<Challenge, ApiError> {
    let challenge = challenges
        .get(subject)
        .await?
        .filter(|c| c.flow == flow)
        .ok_or(ApiError::ChallengeNotFound)?;

    if challenge.is_expired_at(Utc::now()) {
        challenges.delete(subject).await?;
        return Err(ApiError::ChallengeExpired);
    }

    if code != challenge.code {
        return Err(ApiError::InvalidCode);
    }

    challenges.delete(subject).await?;
    Ok(challenge)
}
