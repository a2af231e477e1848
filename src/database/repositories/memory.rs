//! In-process stores used by the test suite and by local runs without
//! `DATABASE_URL`. Each store serializes access behind one lock, which gives
//! the same per-employee atomicity the PostgreSQL constraints provide.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{AttendanceStore, EmployeeStore, StoreError};
use crate::database::models::{AttendanceRecord, DateRange, Employee, Role};

#[derive(Default)]
pub struct MemoryAttendanceStore {
    records: Mutex<Vec<AttendanceRecord>>,
}

#[cfg(test)]
impl MemoryAttendanceStore {
    pub(crate) async fn set_break_minutes(&self, record_id: Uuid, minutes: i32) {
        let mut records = self.records.lock().await;
        if let Some(record) = records.iter_mut().find(|r| r.id == record_id) {
            record.break_minutes = minutes;
        }
    }
}

fn newest_first(mut records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    records.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
    records
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn find_open_record(
        &self,
        employee_id: Uuid,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .find(|r| r.employee_id == employee_id && r.is_open())
            .cloned())
    }

    async fn insert_record(
        &self,
        employee_id: Uuid,
        clock_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut records = self.records.lock().await;
        if records
            .iter()
            .any(|r| r.employee_id == employee_id && r.is_open())
        {
            return Err(StoreError::OpenRecordExists);
        }

        let record = AttendanceRecord::open(employee_id, clock_in);
        records.push(record.clone());
        Ok(record)
    }

    async fn update_clock_out(
        &self,
        record_id: Uuid,
        clock_out: DateTime<Utc>,
        work_minutes: i32,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id && r.is_open())
            .ok_or(StoreError::RecordNotOpen)?;

        record.clock_out = Some(clock_out);
        record.work_minutes = Some(work_minutes);
        record.updated_at = clock_out;
        Ok(record.clone())
    }

    async fn list_records(
        &self,
        employee_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = self.records.lock().await;
        let matching = records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| range.is_none_or(|range| range.contains(r.clock_in)))
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    async fn list_records_between(
        &self,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = self.records.lock().await;
        let matching = records
            .iter()
            .filter(|r| range.contains(r.clock_in))
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }
}

#[derive(Default)]
pub struct MemoryEmployeeStore {
    employees: Mutex<HashMap<Uuid, Employee>>,
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let mut employees = self.employees.lock().await;
        if employees.values().any(|e| e.email == employee.email) {
            return Err(StoreError::Conflict(
                "Email is already registered".to_string(),
            ));
        }
        if employees
            .values()
            .any(|e| e.employee_code == employee.employee_code)
        {
            return Err(StoreError::Conflict(
                "Employee code is already registered".to_string(),
            ));
        }

        employees.insert(employee.id, employee.clone());
        Ok(employee.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let employees = self.employees.lock().await;
        Ok(employees.values().find(|e| e.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, StoreError> {
        let employees = self.employees.lock().await;
        Ok(employees.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = self.employees.lock().await;
        let mut all: Vec<Employee> = employees.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<Employee>, StoreError> {
        let mut employees = self.employees.lock().await;
        Ok(employees.get_mut(&id).map(|employee| {
            employee.role = role;
            employee.updated_at = Utc::now();
            employee.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_second_open_record() {
        let store = MemoryAttendanceStore::default();
        let employee_id = Uuid::new_v4();

        store.insert_record(employee_id, at(9)).await.unwrap();
        let second = store.insert_record(employee_id, at(10)).await;

        assert!(matches!(second, Err(StoreError::OpenRecordExists)));
        assert_eq!(store.list_records(employee_id, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn open_records_of_other_employees_do_not_conflict() {
        let store = MemoryAttendanceStore::default();

        store.insert_record(Uuid::new_v4(), at(9)).await.unwrap();
        store.insert_record(Uuid::new_v4(), at(9)).await.unwrap();
    }

    #[tokio::test]
    async fn update_clock_out_only_closes_open_records() {
        let store = MemoryAttendanceStore::default();
        let record = store.insert_record(Uuid::new_v4(), at(9)).await.unwrap();

        let closed = store.update_clock_out(record.id, at(17), 480).await.unwrap();
        assert_eq!(closed.clock_out, Some(at(17)));
        assert_eq!(closed.work_minutes, Some(480));

        let again = store.update_clock_out(record.id, at(18), 540).await;
        assert!(matches!(again, Err(StoreError::RecordNotOpen)));

        let missing = store.update_clock_out(Uuid::new_v4(), at(18), 0).await;
        assert!(matches!(missing, Err(StoreError::RecordNotOpen)));
    }

    #[tokio::test]
    async fn list_records_filters_by_inclusive_range_newest_first() {
        let store = MemoryAttendanceStore::default();
        let employee_id = Uuid::new_v4();
        for hour in [8, 10, 12] {
            let record = store.insert_record(employee_id, at(hour)).await.unwrap();
            store
                .update_clock_out(record.id, at(hour) + Duration::minutes(30), 30)
                .await
                .unwrap();
        }

        let range = DateRange::new(at(10), at(12)).unwrap();
        let records = store.list_records(employee_id, Some(range)).await.unwrap();

        let clock_ins: Vec<_> = records.iter().map(|r| r.clock_in).collect();
        assert_eq!(clock_ins, vec![at(12), at(10)]);
    }

    #[tokio::test]
    async fn employee_store_rejects_duplicate_email_and_code() {
        let store = MemoryEmployeeStore::default();
        let now = at(9);
        let first = Employee::new(
            "Aiko".into(),
            "aiko@example.com".into(),
            "E-001".into(),
            "Sales".into(),
            "hash".into(),
            now,
        );
        store.create(&first).await.unwrap();

        let same_email = Employee::new(
            "Other".into(),
            "aiko@example.com".into(),
            "E-002".into(),
            "Sales".into(),
            "hash".into(),
            now,
        );
        let same_code = Employee::new(
            "Other".into(),
            "other@example.com".into(),
            "E-001".into(),
            "Sales".into(),
            "hash".into(),
            now,
        );

        assert!(matches!(store.create(&same_email).await, Err(StoreError::Conflict(_))));
        assert!(matches!(store.create(&same_code).await, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_role_returns_none_for_unknown_employee() {
        let store = MemoryEmployeeStore::default();
        assert!(store.update_role(Uuid::new_v4(), Role::Admin).await.unwrap().is_none());
    }
}
