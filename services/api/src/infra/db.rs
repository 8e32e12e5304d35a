use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, QueryFilter,
};
use uuid::Uuid;

use staffdesk_api_schema::employees;

use crate::domain::repository::EmployeeRepository;
use crate::domain::types::{Employee, EmployeeChanges, EmployeeStatus};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn create(&self, employee: &Employee) -> Result<(), ApiError> {
        employees::ActiveModel {
            id: Set(employee.id),
            name: Set(employee.name.clone()),
            email: Set(employee.email.clone()),
            job_title: Set(employee.job_title.clone()),
            phone_number: Set(employee.phone_number.clone()),
            status: Set(employee.status.as_str().to_owned()),
            password_hash: Set(employee.password_hash.clone()),
            created_at: Set(employee.created_at),
            updated_at: Set(employee.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create employee")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError> {
        let model = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(model.map(employee_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, ApiError> {
        let model = employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find employee by email")?;
        Ok(model.map(employee_from_model))
    }

    async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        let models = employees::Entity::find()
            .all(&self.db)
            .await
            .context("list employees")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> Result<Option<Employee>, ApiError> {
        let Some(model) = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee for update")?
        else {
            return Ok(None);
        };

        let mut am = model.into_active_model();
        if let Some(name) = changes.name {
            am.name = Set(name);
        }
        if let Some(email) = changes.email {
            am.email = Set(email);
        }
        if let Some(job_title) = changes.job_title {
            am.job_title = Set(job_title);
        }
        if let Some(phone_number) = changes.phone_number {
            am.phone_number = Set(phone_number);
        }
        if let Some(status) = changes.status {
            am.status = Set(status.as_str().to_owned());
        }
        am.updated_at = Set(Utc::now());

        let updated = am.update(&self.db).await.context("update employee")?;
        Ok(Some(employee_from_model(updated)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = employees::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete employee")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<bool, ApiError> {
        let Some(model) = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee for password update")?
        else {
            return Ok(false);
        };

        let mut am = model.into_active_model();
        am.password_hash = Set(Some(hash.to_owned()));
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("set password hash")?;
        Ok(true)
    }
}

fn employee_from_model(model: employees::Model) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        email: model.email,
        job_title: model.job_title,
        phone_number: model.phone_number,
        // Unknown values cannot be written through this repository; treat
        // any stray row as inactive rather than failing the read.
        status: EmployeeStatus::from_str(&model.status).unwrap_or(EmployeeStatus::Inactive),
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
