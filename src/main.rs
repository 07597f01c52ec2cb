use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod clock;
mod config;
mod docs;
mod error;
mod model;
mod routes;
mod service;
mod store;
mod utils;

use config::Config;

use crate::clock::{Clock, SystemClock};
use crate::docs::ApiDoc;
use crate::service::attendance::AttendanceService;
use crate::service::reports::ReportService;
use crate::store::memory::{MemoryAttendanceStore, MemoryEmployeeDirectory};
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance Management Service"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = Arc::new(MemoryAttendanceStore::new());
    let directory = Arc::new(MemoryEmployeeDirectory::new());
    let system_clock = Arc::new(SystemClock);

    let attendance = Data::new(AttendanceService::new(store.clone(), system_clock.clone()));
    let reports = Data::new(ReportService::new(
        store.clone(),
        directory.clone(),
        system_clock.clone(),
    ));

    if config.seed_demo_data {
        let store = store.clone();
        let directory = directory.clone();
        let today = system_clock.today();
        actix_web::rt::spawn(async move {
            if let Err(e) = utils::seed::seed_demo_data(store.as_ref(), directory.as_ref(), today).await
            {
                eprintln!("Failed to seed demo data: {:?}", e);
            }
        });
    }

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(attendance.clone())
            .app_data(reports.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
