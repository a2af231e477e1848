use std::sync::Arc;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use database::repositories::{AttendanceStore, EmployeeStore};
pub use services::{AuthService, Clock, Ledger};

/// Shared handles registered once as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Ledger,
    pub auth_service: AuthService,
    pub attendance: Arc<dyn AttendanceStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        employees: Arc<dyn EmployeeStore>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            ledger: Ledger::new(attendance.clone(), clock.clone()),
            auth_service: AuthService::new(employees.clone(), config.clone()),
            attendance,
            employees,
            clock,
            config,
        }
    }
}
