use std::collections::HashMap;

use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{
    AdminOverview, AttendanceWithEmployee, EmployeeInfo, UpdateRoleInput,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::reports::day_range;
use crate::services::user_context::UserContext;

pub async fn overview(ctx: UserContext, state: web::Data<AppState>) -> Result<HttpResponse> {
    ctx.requires_admin()?;

    let today = day_range(state.clock.now())
        .ok_or_else(|| AppError::internal_server_error_message("Invalid current date"))?;

    let employees = state.employees.list_all().await.map_err(AppError::from)?;
    let records = state
        .attendance
        .list_records_between(today)
        .await
        .map_err(AppError::from)?;

    let clocked_in = records.iter().filter(|r| r.is_open()).count() as i64;
    let completed = records.len() as i64 - clocked_in;

    let directory: HashMap<Uuid, EmployeeInfo> = employees
        .iter()
        .cloned()
        .map(|e| (e.id, EmployeeInfo::from(e)))
        .collect();

    let today = records
        .into_iter()
        .map(|record| AttendanceWithEmployee {
            employee: directory.get(&record.employee_id).cloned(),
            record,
        })
        .collect();

    Ok(ApiResponse::success(AdminOverview {
        total_employees: employees.len() as i64,
        clocked_in,
        completed,
        today,
    }))
}

pub async fn employees(ctx: UserContext, state: web::Data<AppState>) -> Result<HttpResponse> {
    ctx.requires_admin()?;

    let employees: Vec<EmployeeInfo> = state
        .employees
        .list_all()
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(EmployeeInfo::from)
        .collect();

    Ok(ApiResponse::success(employees))
}

pub async fn update_role(
    ctx: UserContext,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateRoleInput>,
) -> Result<HttpResponse> {
    ctx.requires_admin()?;

    let target_id = path.into_inner();
    if target_id == ctx.employee_id() {
        return Err(AppError::Forbidden("Admins cannot change their own role".to_string()).into());
    }

    let role = input.into_inner().role;
    let employee = state
        .employees
        .update_role(target_id, role)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    log::info!(
        "Employee {} set role of {} to {}",
        ctx.employee_id(),
        employee.id,
        employee.role
    );

    Ok(ApiResponse::success(EmployeeInfo::from(employee)))
}
