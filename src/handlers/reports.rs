use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::MonthlyReportQuery;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::reports::{current_month, month_range, monthly_report};
use crate::services::user_context::UserContext;

pub async fn monthly(
    ctx: UserContext,
    state: web::Data<AppState>,
    query: web::Query<MonthlyReportQuery>,
) -> Result<HttpResponse> {
    let (this_year, this_month) = current_month(state.clock.now());
    let year = query.year.unwrap_or(this_year);
    let month = query.month.unwrap_or(this_month);

    let range = month_range(year, month)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid month: {}-{}", year, month)))?;

    let records = state
        .ledger
        .history(ctx.employee_id(), Some(range))
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(monthly_report(year, month, records)))
}
