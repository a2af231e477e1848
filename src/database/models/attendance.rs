use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::EmployeeInfo;

/// One work session for one employee. `clock_out == None` means the session
/// is still open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub break_minutes: i32,
    pub work_minutes: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn open(employee_id: Uuid, clock_in: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            clock_in,
            clock_out: None,
            break_minutes: 0,
            work_minutes: None,
            notes: None,
            created_at: clock_in,
            updated_at: clock_in,
        }
    }

    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// Inclusive time window over `clock_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// Returns `None` when `from` is after `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatus {
    pub is_clocked_in: bool,
    pub record_id: Option<Uuid>,
    pub clock_in: Option<DateTime<Utc>>,
}

impl From<Option<AttendanceRecord>> for AttendanceStatus {
    fn from(open: Option<AttendanceRecord>) -> Self {
        match open {
            Some(record) => Self {
                is_clocked_in: true,
                record_id: Some(record.id),
                clock_in: Some(record.clock_in),
            },
            None => Self {
                is_clocked_in: false,
                record_id: None,
                clock_in: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInResponse {
    pub id: Uuid,
    pub clock_in: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithEmployee {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub employee: Option<EmployeeInfo>,
}
