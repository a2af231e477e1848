use actix_web::web;

use crate::handlers::admin;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/overview", web::get().to(admin::overview))
            .route("/employees", web::get().to(admin::employees))
            .route("/employees/{id}/role", web::put().to(admin::update_role)),
    );
}
