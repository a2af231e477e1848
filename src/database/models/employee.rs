use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        #[default]
        Employee => "employee",
        Admin => "admin",
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Company-issued employee number, unique across the directory.
    pub employee_code: String,
    pub department: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(
        name: String,
        email: String,
        employee_code: String,
        department: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            employee_code,
            department,
            role: Role::Employee,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Public view of an employee, safe to return from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub employee_code: String,
    pub department: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeInfo {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            employee_code: employee.employee_code,
            department: employee.department,
            role: employee.role,
            created_at: employee.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleInput {
    pub role: Role,
}
