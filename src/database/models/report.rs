use serde::{Deserialize, Serialize};

use super::attendance::{AttendanceRecord, AttendanceWithEmployee};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub total_work_minutes: i64,
    pub completed_days: i64,
    pub average_work_minutes: i64,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_employees: i64,
    pub clocked_in: i64,
    pub completed: i64,
    pub today: Vec<AttendanceWithEmployee>,
}
