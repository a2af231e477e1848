use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{AttendanceRecord, DateRange, Employee, Role};

pub mod attendance;
pub mod employee;
pub mod memory;

pub use attendance::PgAttendanceStore;
pub use employee::PgEmployeeStore;
pub use memory::{MemoryAttendanceStore, MemoryEmployeeStore};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("employee already has an open attendance record")]
    OpenRecordExists,

    #[error("attendance record is not open")]
    RecordNotOpen,

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistent storage for attendance records.
///
/// Implementations must make `insert_record` enforce "at most one open record
/// per employee" on their own, so that two racing inserts cannot both succeed.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn find_open_record(
        &self,
        employee_id: Uuid,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Fails with [`StoreError::OpenRecordExists`] if the employee already has
    /// an open record.
    async fn insert_record(
        &self,
        employee_id: Uuid,
        clock_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Closes an open record. Fails with [`StoreError::RecordNotOpen`] when the
    /// record is missing or already closed.
    async fn update_clock_out(
        &self,
        record_id: Uuid,
        clock_out: DateTime<Utc>,
        work_minutes: i32,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Records of one employee, newest `clock_in` first.
    async fn list_records(
        &self,
        employee_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Records of every employee with `clock_in` inside `range`, newest first.
    async fn list_records_between(
        &self,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] on a duplicate email or employee code.
    async fn create(&self, employee: &Employee) -> Result<Employee, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError>;

    /// Newest registration first.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Employee>, StoreError>;
}
