//! Attendance ledger: the only writer of attendance records.
//!
//! Every employee has at most one open record. A record is opened by
//! [`Ledger::clock_in`] and closed exactly once by [`Ledger::clock_out`];
//! closed records are never reopened, a later clock-in starts a new record.

use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{AttendanceRecord, AttendanceStatus, DateRange};
use crate::database::repositories::{AttendanceStore, StoreError};
use crate::services::clock::Clock;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Already clocked in")]
    AlreadyClockedIn,

    #[error("Not clocked in")]
    NotClockedIn,

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

/// Minutes worked between `clock_in` and `clock_out`, minus the break.
///
/// Elapsed minutes are truncated, never rounded. A result below zero clamps
/// to zero.
pub fn work_minutes(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>, break_minutes: i32) -> i32 {
    let worked = (clock_out - clock_in).num_minutes() - i64::from(break_minutes);
    worked.clamp(0, i64::from(i32::MAX)) as i32
}

#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Opens a new record for the employee.
    pub async fn clock_in(&self, employee_id: Uuid) -> Result<AttendanceRecord, LedgerError> {
        if self.store.find_open_record(employee_id).await?.is_some() {
            log::warn!("Employee {} tried to clock in while already clocked in", employee_id);
            return Err(LedgerError::AlreadyClockedIn);
        }

        // A concurrent clock-in can still win between the check above and the
        // insert; the store rejects the loser.
        let now = self.now();
        match self.store.insert_record(employee_id, now).await {
            Ok(record) => {
                log::info!("Employee {} clocked in (record {})", employee_id, record.id);
                Ok(record)
            }
            Err(StoreError::OpenRecordExists) => {
                log::warn!("Employee {} lost a concurrent clock-in", employee_id);
                Err(LedgerError::AlreadyClockedIn)
            }
            Err(e) => {
                log::error!("Failed to clock in employee {}: {}", employee_id, e);
                Err(e.into())
            }
        }
    }

    /// Closes the employee's open record and computes its work minutes.
    pub async fn clock_out(&self, employee_id: Uuid) -> Result<AttendanceRecord, LedgerError> {
        let open = self
            .store
            .find_open_record(employee_id)
            .await?
            .ok_or_else(|| {
                log::warn!("Employee {} tried to clock out without an open record", employee_id);
                LedgerError::NotClockedIn
            })?;

        let mut clock_out = self.now();
        if clock_out <= open.clock_in {
            log::warn!(
                "Clock for employee {} reads {} which is not after clock-in {}",
                employee_id,
                clock_out,
                open.clock_in
            );
            clock_out = open.clock_in + Duration::microseconds(1);
        }

        let minutes = work_minutes(open.clock_in, clock_out, open.break_minutes);

        match self.store.update_clock_out(open.id, clock_out, minutes).await {
            Ok(record) => {
                log::info!(
                    "Employee {} clocked out (record {}, {} minutes)",
                    employee_id,
                    record.id,
                    minutes
                );
                Ok(record)
            }
            Err(StoreError::RecordNotOpen) => {
                log::warn!("Record {} was closed concurrently", open.id);
                Err(LedgerError::NotClockedIn)
            }
            Err(e) => {
                log::error!("Failed to clock out employee {}: {}", employee_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn status(&self, employee_id: Uuid) -> Result<AttendanceStatus, LedgerError> {
        let open = self.store.find_open_record(employee_id).await?;
        Ok(open.into())
    }

    /// All records of the employee, newest first, optionally limited to
    /// `clock_in` inside `range`.
    pub async fn history(
        &self,
        employee_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>, LedgerError> {
        Ok(self.store.list_records(employee_id, range).await?)
    }

    // Timestamps are stored with microsecond precision.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }
}
