use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use staffdesk_api::domain::repository::{ChallengeStore, CodeDelivery, EmployeeRepository};
use staffdesk_api::domain::types::{
    CHALLENGE_TTL_SECS, Challenge, Employee, EmployeeChanges, EmployeeStatus, FlowType,
};
use staffdesk_api::error::ApiError;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

// ── MockChallengeStore ───────────────────────────────────────────────────────

/// Keyed in-memory challenge store with the same overwrite-per-subject
/// semantics the Redis implementation provides.
pub struct MockChallengeStore {
    pub challenges: Arc<Mutex<HashMap<String, Challenge>>>,
}

impl MockChallengeStore {
    pub fn empty() -> Self {
        Self {
            challenges: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Shared handle for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<HashMap<String, Challenge>>> {
        Arc::clone(&self.challenges)
    }

    pub fn with(challenge: Challenge) -> Self {
        let store = Self::empty();
        store
            .challenges
            .lock()
            .unwrap()
            .insert(challenge.subject.clone(), challenge);
        store
    }
}

impl ChallengeStore for MockChallengeStore {
    async fn put(&self, challenge: &Challenge) -> Result<(), ApiError> {
        self.challenges
            .lock()
            .unwrap()
            .insert(challenge.subject.clone(), challenge.clone());
        Ok(())
    }

    async fn get(&self, subject: &str) -> Result<Option<Challenge>, ApiError> {
        Ok(self.challenges.lock().unwrap().get(subject).cloned())
    }

    async fn delete(&self, subject: &str) -> Result<(), ApiError> {
        self.challenges.lock().unwrap().remove(subject);
        Ok(())
    }
}

// ── MockEmployeeRepo ─────────────────────────────────────────────────────────

pub struct MockEmployeeRepo {
    pub employees: Arc<Mutex<Vec<Employee>>>,
}

impl MockEmployeeRepo {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(Mutex::new(employees)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl EmployeeRepository for MockEmployeeRepo {
    async fn create(&self, employee: &Employee) -> Result<(), ApiError> {
        self.employees.lock().unwrap().push(employee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, ApiError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let Some(employee) = employees.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            employee.name = name;
        }
        if let Some(email) = changes.email {
            employee.email = email;
        }
        if let Some(job_title) = changes.job_title {
            employee.job_title = job_title;
        }
        if let Some(phone_number) = changes.phone_number {
            employee.phone_number = phone_number;
        }
        if let Some(status) = changes.status {
            employee.status = status;
        }
        employee.updated_at = Utc::now();
        Ok(Some(employee.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != id);
        Ok(employees.len() < before)
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<bool, ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let Some(employee) = employees.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        employee.password_hash = Some(hash.to_owned());
        Ok(true)
    }
}

// ── MockDelivery ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDelivery {
    pub sms: Arc<Mutex<Vec<(String, String)>>>,
    pub emails: Arc<Mutex<Vec<(String, String, String)>>>,
    /// When set, every send fails — for at-least-once semantics tests.
    pub fail: bool,
}

impl MockDelivery {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl CodeDelivery for MockDelivery {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), anyhow::Error> {
        if self.fail {
            anyhow::bail!("sms transport down");
        }
        self.sms
            .lock()
            .unwrap()
            .push((to.to_owned(), body.to_owned()));
        Ok(())
    }

    async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<(), anyhow::Error> {
        if self.fail {
            anyhow::bail!("email transport down");
        }
        self.emails
            .lock()
            .unwrap()
            .push((to.to_owned(), subject.to_owned(), html.to_owned()));
        Ok(())
    }
}

// ── Test fixtures ────────────────────────────────────────────────────────────

pub const OWNER_PHONE: &str = "+841234567";
pub const EMPLOYEE_EMAIL: &str = "alice@example.com";

pub fn test_employee() -> Employee {
    let now = Utc::now();
    Employee {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        name: "Alice Nguyen".to_owned(),
        email: EMPLOYEE_EMAIL.to_owned(),
        job_title: "barista".to_owned(),
        phone_number: "+84987654321".to_owned(),
        status: EmployeeStatus::Active,
        password_hash: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn owner_challenge(code: &str) -> Challenge {
    let now = Utc::now();
    Challenge {
        subject: OWNER_PHONE.to_owned(),
        code: code.to_owned(),
        flow: FlowType::OwnerPhone,
        employee_uid: None,
        created_at: now,
        expires_at: now + Duration::seconds(CHALLENGE_TTL_SECS),
    }
}

pub fn employee_challenge(code: &str, uid: Uuid) -> Challenge {
    let now = Utc::now();
    Challenge {
        subject: EMPLOYEE_EMAIL.to_owned(),
        code: code.to_owned(),
        flow: FlowType::EmployeeEmail,
        employee_uid: Some(uid),
        created_at: now,
        expires_at: now + Duration::seconds(CHALLENGE_TTL_SECS),
    }
}

pub fn expired_owner_challenge(code: &str) -> Challenge {
    let now = Utc::now();
    Challenge {
        subject: OWNER_PHONE.to_owned(),
        code: code.to_owned(),
        flow: FlowType::OwnerPhone,
        employee_uid: None,
        created_at: now - Duration::seconds(CHALLENGE_TTL_SECS + 1),
        expires_at: now - Duration::seconds(1),
    }
}
