use actix_web::{
    Error as ActixError, FromRequest, HttpRequest, dev::Payload, web::Data,
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::AppState;
use crate::database::models::Employee;
use crate::error::AppError;
use crate::services::auth::Claims;

/// The authenticated employee, loaded fresh from the store on every request.
///
/// Role checks go through this type rather than the session claims, so a
/// demoted admin loses access immediately.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub employee: Employee,
}

impl UserContext {
    pub fn employee_id(&self) -> Uuid {
        self.employee.id
    }

    pub fn is_admin(&self) -> bool {
        self.employee.is_admin()
    }

    pub fn requires_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            log::warn!(
                "Employee {} attempted an admin operation",
                self.employee_id()
            );
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

impl FromRequest for UserContext {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let claims = Claims::from_request(req, payload).into_inner();
        let state = req.app_data::<Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims?;
            let state = state.ok_or_else(|| {
                AppError::internal_server_error_message("Application state missing")
            })?;

            let employee = state.auth_service.current_employee(&claims).await?;
            Ok(UserContext { employee })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use chrono::Utc;

    fn context(role: Role) -> UserContext {
        let mut employee = Employee::new(
            "Aiko".into(),
            "aiko@example.com".into(),
            "E-7".into(),
            "Sales".into(),
            "hash".into(),
            Utc::now(),
        );
        employee.role = role;
        UserContext { employee }
    }

    #[test]
    fn requires_admin_checks_the_loaded_role() {
        assert!(context(Role::Admin).requires_admin().is_ok());
        assert!(matches!(
            context(Role::Employee).requires_admin(),
            Err(AppError::Forbidden(_))
        ));
    }
}
