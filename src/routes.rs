use crate::{
    api::{attendance, dashboard},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let attendance_limiter = Arc::new(build_limiter(config.rate_attendance_per_min));
    // Exports are uncapped full-table reads; keep the limiter tight.
    let export_limiter = Arc::new(build_limiter(config.rate_export_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/checkin")
                            .wrap(attendance_limiter.clone())
                            .route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/checkout")
                            .wrap(attendance_limiter.clone())
                            .route(web::post().to(attendance::check_out)),
                    )
                    .service(
                        web::resource("/my-history")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::my_history)),
                    )
                    .service(
                        web::resource("/my-summary")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::my_summary)),
                    )
                    .service(
                        web::resource("/today")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::today)),
                    )
                    .service(
                        web::resource("/all")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::all_attendance)),
                    )
                    .service(
                        web::resource("/summary")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::team_summary)),
                    )
                    .service(
                        web::resource("/today-status")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::today_roster)),
                    )
                    .service(
                        web::resource("/export")
                            .wrap(export_limiter)
                            .route(web::get().to(attendance::export_report)),
                    )
                    // /attendance/employee/{id}
                    .service(
                        web::resource("/employee/{id}")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(attendance::employee_attendance)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .service(
                        web::resource("/employee")
                            .wrap(attendance_limiter.clone())
                            .route(web::get().to(dashboard::employee_dashboard)),
                    )
                    .service(
                        web::resource("/manager")
                            .wrap(attendance_limiter)
                            .route(web::get().to(dashboard::manager_dashboard)),
                    ),
            ),
    );
}
