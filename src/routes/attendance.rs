use actix_web::web;

use crate::handlers::attendance;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            .route("/clock-in", web::post().to(attendance::clock_in))
            .route("/clock-out", web::post().to(attendance::clock_out))
            .route("/status", web::get().to(attendance::status))
            .route("/history", web::get().to(attendance::history)),
    );
}
