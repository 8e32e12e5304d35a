use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-code length in digits.
pub const CODE_LEN: usize = 6;

/// Access-code time-to-live in seconds.
pub const CHALLENGE_TTL_SECS: i64 = 300;

/// Login flow a challenge belongs to.
///
/// Owner and employee codes share one key namespace (the subject string), so
/// the flow tag is what stops a code issued for one flow from validating the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowType {
    OwnerPhone,
    EmployeeEmail,
}

/// Pending one-time access code for a subject.
///
/// At most one live challenge exists per subject; issuing a new one
/// overwrites the old. The record is deleted on successful validation and on
/// expiry detection — never validated twice.
/// Persisted record shape: `{subject, code, type, uid?, createdAt, expiresAt}`
/// under the subject key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Phone number (owner flow) or email (employee flow). Store key.
    pub subject: String,
    /// 6-digit numeric code, secret until consumed.
    pub code: String,
    #[serde(rename = "type")]
    pub flow: FlowType,
    /// Employee uid captured at issuance; `None` for the owner flow.
    #[serde(rename = "uid", default, skip_serializing_if = "Option::is_none")]
    pub employee_uid: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    /// Absolute deadline (`created_at` + 5 minutes), not sliding.
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    /// Whether the challenge is expired at `now`. The deadline itself counts
    /// as expired: valid strictly before `expires_at`, expired at and after.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Employee activity status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Employee record.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Position within the company ("barista", "manager", ...); unrelated to
    /// the session role.
    pub job_title: String,
    pub phone_number: String,
    pub status: EmployeeStatus,
    /// Argon2 hash; `None` until a password has been set.
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for an employee record. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.job_title.is_none()
            && self.phone_number.is_none()
            && self.status.is_none()
    }
}
