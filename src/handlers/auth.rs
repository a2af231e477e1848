use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::{AuthResponse, EmployeeInfo, LoginInput, RegisterInput};
use crate::handlers::shared::ApiResponse;
use crate::services::user_context::UserContext;

pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<RegisterInput>,
) -> Result<HttpResponse> {
    let response = state.auth_service.register(input.into_inner()).await?;
    let cookie = state.auth_service.session_cookie(response.token.clone());

    let mut http = ApiResponse::<AuthResponse>::created(response);
    http.add_cookie(&cookie)?;
    Ok(http)
}

pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let response = state.auth_service.login(input.into_inner()).await?;
    log::info!("Employee {} logged in", response.employee.id);
    let cookie = state.auth_service.session_cookie(response.token.clone());

    let mut http = ApiResponse::<AuthResponse>::success(response);
    http.add_cookie(&cookie)?;
    Ok(http)
}

pub async fn logout(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut http = ApiResponse::success_message("Logged out");
    http.add_cookie(&state.auth_service.removal_cookie())?;
    Ok(http)
}

pub async fn me(ctx: UserContext) -> Result<HttpResponse> {
    Ok(ApiResponse::success(EmployeeInfo::from(ctx.employee)))
}
