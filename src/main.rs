use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Result;

use timeclock::database::{
    init_database,
    repositories::{
        AttendanceStore, EmployeeStore, MemoryAttendanceStore, MemoryEmployeeStore,
        PgAttendanceStore, PgEmployeeStore,
    },
};
use timeclock::middleware::RequestId;
use timeclock::services::SystemClock;
use timeclock::{AppState, Config, routes};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!(
        "Starting timeclock API (environment: {})",
        config.environment
    );

    let (attendance, employees): (Arc<dyn AttendanceStore>, Arc<dyn EmployeeStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = init_database(url).await?;
                (
                    Arc::new(PgAttendanceStore::new(pool.clone())),
                    Arc::new(PgEmployeeStore::new(pool)),
                )
            }
            None => {
                log::warn!("DATABASE_URL is not set; records are kept in memory only");
                (
                    Arc::new(MemoryAttendanceStore::default()),
                    Arc::new(MemoryEmployeeStore::default()),
                )
            }
        };

    let app_state = web::Data::new(AppState::new(
        attendance,
        employees,
        Arc::new(SystemClock),
        config.clone(),
    ));

    let server_address = config.server_address();
    log::info!("Listening on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Correlation-ID",
                    ])
                    .expose_headers(vec!["X-Correlation-ID"])
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
