use actix_web::web;

use crate::error::AppError;
use crate::handlers;

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod reports;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures are rendered through AppError like every other error.
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|e, _| AppError::BadRequest(e.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|e, _| AppError::BadRequest(e.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|e, _| AppError::BadRequest(e.to_string()).into()),
    )
    .route("/health", web::get().to(handlers::health))
    .service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(attendance::configure)
            .configure(reports::configure)
            .configure(admin::configure),
    );
}
