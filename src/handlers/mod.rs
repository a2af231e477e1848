pub mod admin;
pub mod attendance;
pub mod auth;
pub mod reports;
pub mod shared;

use actix_web::{HttpResponse, Responder};

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}
