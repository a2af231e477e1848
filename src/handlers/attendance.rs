use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::{ClockInResponse, DateRange, HistoryQuery};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::user_context::UserContext;

pub async fn clock_in(ctx: UserContext, state: web::Data<AppState>) -> Result<HttpResponse> {
    let record = state
        .ledger
        .clock_in(ctx.employee_id())
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::created(ClockInResponse {
        id: record.id,
        clock_in: record.clock_in,
    }))
}

pub async fn clock_out(ctx: UserContext, state: web::Data<AppState>) -> Result<HttpResponse> {
    let record = state
        .ledger
        .clock_out(ctx.employee_id())
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(record))
}

pub async fn status(ctx: UserContext, state: web::Data<AppState>) -> Result<HttpResponse> {
    let status = state
        .ledger
        .status(ctx.employee_id())
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(status))
}

pub async fn history(
    ctx: UserContext,
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let range = match (query.from, query.to) {
        (None, None) => None,
        (Some(from), Some(to)) => Some(DateRange::new(from, to).ok_or_else(|| {
            AppError::BadRequest("'from' must not be after 'to'".to_string())
        })?),
        _ => {
            return Err(AppError::BadRequest(
                "Both 'from' and 'to' are required to filter history".to_string(),
            )
            .into());
        }
    };

    let records = state
        .ledger
        .history(ctx.employee_id(), range)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(records))
}
