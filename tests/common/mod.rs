#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};
use fake::Fake;
use fake::faker::company::en::Industry;
use fake::faker::name::en::Name;
use serde_json::Value;
use uuid::Uuid;

use timeclock::database::models::{AuthResponse, RegisterInput, Role};
use timeclock::database::repositories::{MemoryAttendanceStore, MemoryEmployeeStore};
use timeclock::services::ManualClock;
use timeclock::{AppState, Config};

/// Builds the full application over the given `web::Data<AppState>`.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .wrap(timeclock::middleware::RequestId)
                .configure(timeclock::routes::configure),
        )
        .await
    };
}

pub const PASSWORD: &str = "password123";

pub fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::starting_at(monday_morning())
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        let clock = Arc::new(ManualClock::new(start));
        let state = web::Data::new(AppState::new(
            Arc::new(MemoryAttendanceStore::default()),
            Arc::new(MemoryEmployeeStore::default()),
            clock.clone(),
            Config::test_config(),
        ));

        Self { state, clock }
    }

    /// Registers an employee with generated details.
    pub async fn register_employee(&self) -> AuthResponse {
        self.state
            .auth_service
            .register(register_input())
            .await
            .unwrap()
    }

    /// Registers an employee and promotes them to admin, returning a token
    /// issued after the promotion.
    pub async fn register_admin(&self) -> AuthResponse {
        let registered = self.register_employee().await;
        let admin = self
            .state
            .employees
            .update_role(registered.employee.id, Role::Admin)
            .await
            .unwrap()
            .unwrap();
        let token = self.state.auth_service.generate_token(&admin).unwrap();

        AuthResponse {
            token,
            employee: admin.into(),
        }
    }
}

pub fn register_input() -> RegisterInput {
    let suffix = Uuid::new_v4().simple().to_string();
    RegisterInput {
        name: Name().fake(),
        email: format!("employee-{}@example.com", &suffix[..12]),
        employee_code: format!("EMP-{}", &suffix[..8]).to_uppercase(),
        department: Industry().fake(),
        password: PASSWORD.to_string(),
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
