use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EmployeeStore, StoreError};
use crate::database::{
    models::{Employee, Role},
    utils::sql,
};

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn conflict_from(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &error {
        match db_err.constraint() {
            Some("employees_email_key") => {
                return StoreError::Conflict("Email is already registered".to_string());
            }
            Some("employees_employee_code_key") => {
                return StoreError::Conflict("Employee code is already registered".to_string());
            }
            _ => {}
        }
    }
    StoreError::Database(error)
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(&sql(r#"
            INSERT INTO
                employees (
                    id,
                    name,
                    email,
                    employee_code,
                    department,
                    role,
                    password_hash,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                email,
                employee_code,
                department,
                role,
                password_hash,
                created_at,
                updated_at
        "#))
        .bind(employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.employee_code)
        .bind(&employee.department)
        .bind(employee.role)
        .bind(&employee.password_hash)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_from)?;

        Ok(employee)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                name,
                email,
                employee_code,
                department,
                role,
                password_hash,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                email = ?
        "#))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                name,
                email,
                employee_code,
                department,
                role,
                password_hash,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                id = ?
        "#))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                name,
                email,
                employee_code,
                department,
                role,
                password_hash,
                created_at,
                updated_at
            FROM
                employees
            ORDER BY
                created_at DESC
        "#))
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Employee>, StoreError> {
        let updated_at = Utc::now();

        let employee = sqlx::query_as::<_, Employee>(&sql(r#"
            UPDATE employees
            SET
                role = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                email,
                employee_code,
                department,
                role,
                password_hash,
                created_at,
                updated_at
        "#))
        .bind(role)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }
}
