use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::password::{
    MIN_PASSWORD_LEN, generate_temp_password, hash_password,
};
use crate::domain::repository::{CodeDelivery, EmployeeRepository};
use crate::domain::types::{Employee, EmployeeChanges, EmployeeStatus};
use crate::error::ApiError;

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeInput {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub phone_number: String,
}

pub struct CreateEmployeeUseCase<E, D>
where
    E: EmployeeRepository,
    D: CodeDelivery,
{
    pub employees: E,
    pub delivery: D,
    /// Origin the emailed setup link points at, e.g. `http://localhost:3000`.
    pub dashboard_origin: String,
}

impl<E, D> CreateEmployeeUseCase<E, D>
where
    E: EmployeeRepository,
    D: CodeDelivery,
{
    pub async fn execute(&self, input: CreateEmployeeInput) -> Result<Employee, ApiError> {
        // 1. Duplicate email → 409.
        if self.employees.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        // 2. Temporary password, hashed into the record so password login
        //    works before the employee runs account setup.
        let temp_password = generate_temp_password();
        let password_hash = hash_password(&temp_password)?;

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            job_title: input.job_title,
            phone_number: input.phone_number,
            status: EmployeeStatus::Active,
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        };
        self.employees.create(&employee).await?;

        // 3. Welcome email with the temporary password and setup link.
        //    Delivery failure does not undo the record.
        let setup_link = format!(
            "{}/employee-setup?uid={}&email={}",
            self.dashboard_origin, employee.id, employee.email
        );
        let html = format!(
            "<p>Hello {},</p>\
             <p>Welcome to Staffdesk!</p>\
             <p>Your temporary login credentials are:</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Temporary Password:</strong> {}</p>\
             <p>Please click on the link below to set up your permanent password \
             and access your account:</p>\
             <p><a href=\"{}\">Set Up Your Account</a></p>",
            employee.name, employee.email, temp_password, setup_link
        );
        if let Err(e) = self
            .delivery
            .send_email(&employee.email, "Welcome to Staffdesk - Account Setup", &html)
            .await
        {
            warn!(email = %employee.email, error = %e, "welcome email delivery failed");
        }

        Ok(employee)
    }
}

// ── GetEmployee ──────────────────────────────────────────────────────────────

pub struct GetEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> GetEmployeeUseCase<E> {
    pub async fn execute(&self, id: Uuid) -> Result<Employee, ApiError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(ApiError::EmployeeNotFound)
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> ListEmployeesUseCase<E> {
    pub async fn execute(&self) -> Result<Vec<Employee>, ApiError> {
        self.employees.list_all().await
    }
}

// ── UpdateEmployee ───────────────────────────────────────────────────────────

pub struct UpdateEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> UpdateEmployeeUseCase<E> {
    pub async fn execute(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Employee, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::MissingField("updates"));
        }
        self.employees
            .update(id, changes)
            .await?
            .ok_or(ApiError::EmployeeNotFound)
    }
}

// ── DeleteEmployee ───────────────────────────────────────────────────────────

pub struct DeleteEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> DeleteEmployeeUseCase<E> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.employees.delete(id).await? {
            return Err(ApiError::EmployeeNotFound);
        }
        Ok(())
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordInput {
    pub uid: Uuid,
    pub new_password: String,
}

pub struct SetPasswordUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> SetPasswordUseCase<E> {
    pub async fn execute(&self, input: SetPasswordInput) -> Result<(), ApiError> {
        if input.new_password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::WeakPassword);
        }
        let hash = hash_password(&input.new_password)?;
        if !self.employees.set_password_hash(input.uid, &hash).await? {
            return Err(ApiError::EmployeeNotFound);
        }
        Ok(())
    }
}
