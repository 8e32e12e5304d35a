use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::Identity;
use crate::state::AppState;
use crate::usecase::employee::{
    CreateEmployeeInput, CreateEmployeeUseCase, DeleteEmployeeUseCase, GetEmployeeUseCase,
    ListEmployeesUseCase, SetPasswordInput, SetPasswordUseCase, UpdateEmployeeUseCase,
};
use crate::domain::types::{Employee, EmployeeChanges, EmployeeStatus};

/// Employee record as exposed to the dashboard. The password hash never
/// leaves the service.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Position within the company; the original wire name is `role`.
    #[serde(rename = "role")]
    pub job_title: String,
    pub phone_number: String,
    pub status: EmployeeStatus,
    #[serde(serialize_with = "staffdesk_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "staffdesk_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name,
            email: e.email,
            job_title: e.job_title,
            phone_number: e.phone_number,
            status: e.status,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

fn required(field: Option<String>, name: &'static str) -> Result<String, ApiError> {
    field
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField(name))
}

// ── POST /api/owner/employees/create ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Position within the company (original wire name).
    pub role: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
pub struct CreateEmployeeResponse {
    pub success: bool,
    pub message: &'static str,
    pub employee: EmployeeResponse,
}

pub async fn create_employee(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<Json<CreateEmployeeResponse>, ApiError> {
    identity.require_owner()?;

    let name = required(body.name, "name")?;
    let email = required(body.email, "email")?;
    let job_title = required(body.role, "role")?;
    let phone_number = required(body.phone_number, "phoneNumber")?;

    let usecase = CreateEmployeeUseCase {
        employees: state.employee_repo(),
        delivery: state.delivery(),
        dashboard_origin: state.dashboard_origin.clone(),
    };
    let employee = usecase
        .execute(CreateEmployeeInput {
            name,
            email,
            job_title,
            phone_number,
        })
        .await?;

    Ok(Json(CreateEmployeeResponse {
        success: true,
        message: "Employee created and welcome email sent successfully.",
        employee: employee.into(),
    }))
}

// ── GET /api/owner/employees/get/{employee_id} ───────────────────────────────

#[derive(Serialize)]
pub struct EmployeeEnvelope {
    pub success: bool,
    pub employee: EmployeeResponse,
}

pub async fn get_employee(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<EmployeeEnvelope>, ApiError> {
    identity.require_owner()?;

    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let employee = usecase.execute(employee_id).await?;

    Ok(Json(EmployeeEnvelope {
        success: true,
        employee: employee.into(),
    }))
}

// ── GET /api/owner/employees/get-all ─────────────────────────────────────────

#[derive(Serialize)]
pub struct EmployeeListResponse {
    pub success: bool,
    pub employees: Vec<EmployeeResponse>,
}

pub async fn get_all_employees(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<EmployeeListResponse>, ApiError> {
    identity.require_owner()?;

    let usecase = ListEmployeesUseCase {
        employees: state.employee_repo(),
    };
    let employees = usecase.execute().await?;

    Ok(Json(EmployeeListResponse {
        success: true,
        employees: employees.into_iter().map(Into::into).collect(),
    }))
}

// ── PUT /api/owner/employees/update/{employee_id} ────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Position within the company (original wire name).
    pub role: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Serialize)]
pub struct UpdateEmployeeResponse {
    pub success: bool,
    pub message: &'static str,
    pub employee: EmployeeResponse,
}

pub async fn update_employee(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> Result<Json<UpdateEmployeeResponse>, ApiError> {
    identity.require_owner()?;

    let usecase = UpdateEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let employee = usecase
        .execute(
            employee_id,
            EmployeeChanges {
                name: body.name,
                email: body.email,
                job_title: body.role,
                phone_number: body.phone_number,
                status: body.status,
            },
        )
        .await?;

    Ok(Json(UpdateEmployeeResponse {
        success: true,
        message: "Employee updated successfully.",
        employee: employee.into(),
    }))
}

// ── DELETE /api/owner/employees/delete/{employee_id} ─────────────────────────

#[derive(Serialize)]
pub struct DeleteEmployeeResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn delete_employee(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<DeleteEmployeeResponse>, ApiError> {
    identity.require_owner()?;

    let usecase = DeleteEmployeeUseCase {
        employees: state.employee_repo(),
    };
    usecase.execute(employee_id).await?;

    Ok(Json(DeleteEmployeeResponse {
        success: true,
        message: "Employee deleted successfully.",
    }))
}

// ── POST /api/owner/employees/set-password ───────────────────────────────────

// Ungated: the setup flow runs from the emailed link before any token exists.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
    pub uid: Option<Uuid>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Serialize)]
pub struct SetPasswordResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn set_employee_password(
    State(state): State<AppState>,
    Json(body): Json<SetPasswordRequest>,
) -> Result<Json<SetPasswordResponse>, ApiError> {
    let uid = body.uid.ok_or(ApiError::MissingField("uid"))?;
    let _email = required(body.email, "email")?;
    let new_password = required(body.new_password, "newPassword")?;

    let usecase = SetPasswordUseCase {
        employees: state.employee_repo(),
    };
    usecase.execute(SetPasswordInput { uid, new_password }).await?;

    Ok(Json(SetPasswordResponse {
        success: true,
        message: "Password set successfully.",
    }))
}

// ── GET /api/owner/employees/me ──────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<EmployeeEnvelope>, ApiError> {
    identity.require_employee()?;
    let uid = identity.employee_uid()?;

    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let employee = usecase.execute(uid).await?;

    Ok(Json(EmployeeEnvelope {
        success: true,
        employee: employee.into(),
    }))
}
