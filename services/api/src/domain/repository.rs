#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Challenge, Employee, EmployeeChanges};
use crate::error::ApiError;

/// Keyed store of pending access codes, one live challenge per subject.
///
/// The store must guarantee atomic read/write per key; cross-operation
/// races (a validation against a concurrent re-issuance) resolve as
/// last-writer-wins on the record.
pub trait ChallengeStore: Send + Sync {
    /// Persist a challenge under its subject, silently replacing any
    /// previous one for the same subject.
    async fn put(&self, challenge: &Challenge) -> Result<(), ApiError>;

    async fn get(&self, subject: &str) -> Result<Option<Challenge>, ApiError>;

    /// Remove the challenge for a subject. Removing a missing key is not an
    /// error.
    async fn delete(&self, subject: &str) -> Result<(), ApiError>;
}

/// Repository for employee records.
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: &Employee) -> Result<(), ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, ApiError>;

    async fn list_all(&self) -> Result<Vec<Employee>, ApiError>;

    /// Apply a partial update. Returns the updated record, or `None` if the
    /// employee does not exist.
    async fn update(&self, id: Uuid, changes: EmployeeChanges)
    -> Result<Option<Employee>, ApiError>;

    /// Delete an employee. Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Replace the stored password hash. Returns `false` if the employee
    /// does not exist.
    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<bool, ApiError>;
}

/// Out-of-band code delivery (SMS for owners, email for employees).
///
/// Failures are returned to the caller, which logs and swallows them: a
/// persisted-but-undelivered code is an accepted failure mode, not a reason
/// to roll back the challenge.
pub trait CodeDelivery: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), anyhow::Error>;

    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<(), anyhow::Error>;
}
