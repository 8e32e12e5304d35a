use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use staffdesk_core::health::{healthz, readyz};
use staffdesk_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{
        generate_access_code, login_email, login_password, validate_access_code,
        validate_employee_access_code, verify_token,
    },
    employee::{
        create_employee, delete_employee, get_all_employees, get_employee, get_me,
        set_employee_password, update_employee,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Owner login
        .route("/api/owner/generate-access-code", post(generate_access_code))
        .route("/api/owner/validate-access-code", post(validate_access_code))
        // Employee login
        .route("/api/employee/login-email", post(login_email))
        .route(
            "/api/employee/validate-access-code",
            post(validate_employee_access_code),
        )
        .route("/api/employee/login-password", post(login_password))
        // Token verification
        .route("/api/verify-token", post(verify_token))
        // Employee records
        .route("/api/owner/employees/create", post(create_employee))
        .route("/api/owner/employees/get/{employee_id}", get(get_employee))
        .route("/api/owner/employees/get-all", get(get_all_employees))
        .route(
            "/api/owner/employees/update/{employee_id}",
            put(update_employee),
        )
        .route(
            "/api/owner/employees/delete/{employee_id}",
            delete(delete_employee),
        )
        .route(
            "/api/owner/employees/set-password",
            post(set_employee_password),
        )
        .route("/api/owner/employees/me", get(get_me))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
