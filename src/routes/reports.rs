use actix_web::web;

use crate::handlers::reports;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/monthly", web::get().to(reports::monthly)));
}
