use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AttendanceStore, StoreError};
use crate::database::{
    models::{AttendanceRecord, DateRange},
    utils::sql,
};

const ONE_OPEN_PER_EMPLOYEE: &str = "attendance_records_one_open_per_employee";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgAttendanceStore {
    pool: PgPool,
}

impl PgAttendanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_open_record_conflict(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(ONE_OPEN_PER_EMPLOYEE)
        }
        _ => false,
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn find_open_record(
        &self,
        employee_id: Uuid,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
            SELECT
                id,
                employee_id,
                clock_in,
                clock_out,
                break_minutes,
                work_minutes,
                notes,
                created_at,
                updated_at
            FROM
                attendance_records
            WHERE
                employee_id = ?
                AND clock_out IS NULL
        "#))
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_record(
        &self,
        employee_id: Uuid,
        clock_in: DateTime<Utc>,
    ) -> Result<AttendanceRecord, StoreError> {
        let record = AttendanceRecord::open(employee_id, clock_in);

        // The partial unique index rejects a second open row for the same
        // employee, which makes check-then-insert atomic.
        let result = sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
            INSERT INTO
                attendance_records (
                    id,
                    employee_id,
                    clock_in,
                    break_minutes,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                employee_id,
                clock_in,
                clock_out,
                break_minutes,
                work_minutes,
                notes,
                created_at,
                updated_at
        "#))
        .bind(record.id)
        .bind(record.employee_id)
        .bind(record.clock_in)
        .bind(record.break_minutes)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(record),
            Err(e) if is_open_record_conflict(&e) => Err(StoreError::OpenRecordExists),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_clock_out(
        &self,
        record_id: Uuid,
        clock_out: DateTime<Utc>,
        work_minutes: i32,
    ) -> Result<AttendanceRecord, StoreError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
            UPDATE attendance_records
            SET
                clock_out = ?,
                work_minutes = ?,
                updated_at = ?
            WHERE
                id = ?
                AND clock_out IS NULL
            RETURNING
                id,
                employee_id,
                clock_in,
                clock_out,
                break_minutes,
                work_minutes,
                notes,
                created_at,
                updated_at
        "#))
        .bind(clock_out)
        .bind(work_minutes)
        .bind(clock_out)
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await?;

        record.ok_or(StoreError::RecordNotOpen)
    }

    async fn list_records(
        &self,
        employee_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = match range {
            Some(range) => {
                sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
                    SELECT
                        id,
                        employee_id,
                        clock_in,
                        clock_out,
                        break_minutes,
                        work_minutes,
                        notes,
                        created_at,
                        updated_at
                    FROM
                        attendance_records
                    WHERE
                        employee_id = ?
                        AND clock_in >= ?
                        AND clock_in <= ?
                    ORDER BY
                        clock_in DESC
                "#))
                .bind(employee_id)
                .bind(range.from)
                .bind(range.to)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
                    SELECT
                        id,
                        employee_id,
                        clock_in,
                        clock_out,
                        break_minutes,
                        work_minutes,
                        notes,
                        created_at,
                        updated_at
                    FROM
                        attendance_records
                    WHERE
                        employee_id = ?
                    ORDER BY
                        clock_in DESC
                "#))
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    async fn list_records_between(
        &self,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&sql(r#"
            SELECT
                id,
                employee_id,
                clock_in,
                clock_out,
                break_minutes,
                work_minutes,
                notes,
                created_at,
                updated_at
            FROM
                attendance_records
            WHERE
                clock_in >= ?
                AND clock_in <= ?
            ORDER BY
                clock_in DESC
        "#))
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
