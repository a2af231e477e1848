use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{
    Error as ActixError, FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration as CookieDuration},
    dev::Payload,
    web::Data,
};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::config::Config;
use crate::database::models::{AuthResponse, Employee, LoginInput, RegisterInput, Role};
use crate::database::repositories::EmployeeStore;
use crate::error::AppError;
use crate::middleware::RequestIdExt;

pub const SESSION_COOKIE: &str = "session";
const MIN_PASSWORD_LENGTH: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // employee id
    pub name: String,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn employee_id(&self) -> Uuid {
        self.sub
    }
}

fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = session_token(req) else {
            log::debug!(
                "Request {} to {} has no session",
                req.correlation_id().map(|c| c.0).unwrap_or_default(),
                req.path()
            );
            return ready(Err(AppError::unauthorized("Missing session").into()));
        };

        let Some(state) = req.app_data::<Data<AppState>>() else {
            return ready(Err(
                AppError::internal_server_error_message("Application state missing").into(),
            ));
        };

        ready(
            state
                .auth_service
                .verify_token(&token)
                .map_err(ActixError::from),
        )
    }
}

#[derive(Clone)]
pub struct AuthService {
    employees: Arc<dyn EmployeeStore>,
    config: Config,
}

impl AuthService {
    pub fn new(employees: Arc<dyn EmployeeStore>, config: Config) -> Self {
        Self { employees, config }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse, AppError> {
        let name = input.name.trim();
        let email = input.email.trim().to_lowercase();
        let employee_code = input.employee_code.trim();
        let department = input.department.trim();

        let mut missing = Vec::new();
        for (field, value) in [
            ("name", name),
            ("email", email.as_str()),
            ("employeeCode", employee_code),
            ("department", department),
            ("password", input.password.trim()),
        ] {
            if value.is_empty() {
                missing.push(field);
            }
        }
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if input.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = hash(&input.password, self.config.bcrypt_cost).map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::internal_server_error_message("Failed to hash password")
        })?;

        let employee = Employee::new(
            name.to_string(),
            email,
            employee_code.to_string(),
            department.to_string(),
            password_hash,
            Utc::now(),
        );
        let employee = self.employees.create(&employee).await?;
        log::info!("Registered employee {} ({})", employee.id, employee.employee_code);

        let token = self.generate_token(&employee)?;
        Ok(AuthResponse {
            token,
            employee: employee.into(),
        })
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse, AppError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || input.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let employee = self
            .employees
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        let matches = verify(&input.password, &employee.password_hash).map_err(|e| {
            log::error!("Failed to verify password for {}: {}", employee.id, e);
            AppError::internal_server_error_message("Failed to verify password")
        })?;
        if !matches {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.generate_token(&employee)?;
        Ok(AuthResponse {
            token,
            employee: employee.into(),
        })
    }

    /// Resolves a session to the current employee record, so that role
    /// changes apply before the token expires.
    pub async fn current_employee(&self, claims: &Claims) -> Result<Employee, AppError> {
        self.employees
            .find_by_id(claims.employee_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Employee no longer exists"))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            log::debug!("Rejected session token: {}", e);
            AppError::unauthorized("Invalid or expired session")
        })?;

        Ok(token_data.claims)
    }

    pub fn generate_token(&self, employee: &Employee) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::days(self.config.session_ttl_days))
            .ok_or_else(|| AppError::internal_server_error_message("Invalid session lifetime"))?
            .timestamp() as usize;

        let claims = Claims {
            sub: employee.id,
            name: employee.name.clone(),
            role: employee.role,
            exp: expiration,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )
        .map_err(|e| {
            log::error!("Failed to sign session token: {}", e);
            AppError::internal_server_error_message("Failed to create session")
        })
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.is_production())
            .max_age(CookieDuration::days(self.config.session_ttl_days))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.is_production())
            .finish();
        cookie.make_removal();
        cookie
    }
}
