use serde::{Deserialize, Serialize};

use super::employee::EmployeeInfo;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub employee_code: String,
    pub department: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginInput {
    /// Employee's email address
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Session token, also set as the `session` cookie
    pub token: String,
    pub employee: EmployeeInfo,
}
