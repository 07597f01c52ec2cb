use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::auth::AuthUser;
use crate::model::attendance::AttendanceStatus;
use crate::service::attendance::AttendanceService;
use crate::service::export::{EXPORT_FILE_NAME, render_csv};
use crate::service::reports::{AttendanceSummary, ReportService, TeamSummary};

/// Month/year window for personal history and summaries.
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthQuery {
    /// 1-12
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Manager-side filters, shared by `/attendance/all` and `/attendance/export`.
/// `employee_id` is the business code (e.g. `EMP002`), as callers know it.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    pub employee_id: Option<String>,
    pub status: Option<AttendanceStatus>,
    #[param(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
}

/// Check-in for the authenticated employee
#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    responses(
        (status = 201, description = "Checked in", body = Object, example = json!({
            "id": 17, "employee_id": 1002, "day": "2026-03-02",
            "check_in_time": "2026-03-02T08:52:10", "check_out_time": null,
            "status": "present", "total_hours": 0.0
        })),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "error": "already_checked_in", "message": "Already checked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    let record = service.check_in(auth.employee_id).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Check-out for the authenticated employee
#[utoipa::path(
    post,
    path = "/api/attendance/checkout",
    responses(
        (status = 200, description = "Checked out", body = Object),
        (status = 400, description = "No check-in found / already checked out", body = Object, example = json!({
            "error": "already_checked_out", "message": "Already checked out today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    let record = service.check_out(auth.employee_id).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Personal attendance history, newest-first, capped at 100
#[utoipa::path(
    get,
    path = "/api/attendance/my-history",
    params(MonthQuery),
    responses(
        (status = 200, description = "Attendance records", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn my_history(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    // The month window applies only when both parts are given.
    let month = match (query.month, query.year) {
        (Some(month), Some(year)) => Some((year, month)),
        _ => None,
    };
    let records = service.personal_history(auth.employee_id, month).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Personal month summary; month and year default to the current ones
#[utoipa::path(
    get,
    path = "/api/attendance/my-summary",
    params(MonthQuery),
    responses(
        (status = 200, description = "Status counts and hours sum", body = AttendanceSummary),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn my_summary(
    auth: AuthUser,
    reports: web::Data<ReportService>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let summary = reports
        .personal_summary(auth.employee_id, query.month, query.year)
        .await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Today's record for the authenticated employee, `null` before check-in
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Today's record or null", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn today(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    let record = service.today_status(auth.employee_id).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Filtered attendance across all employees, capped at 500 (manager)
#[utoipa::path(
    get,
    path = "/api/attendance/all",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Joined attendance records", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager only"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn all_attendance(
    auth: AuthUser,
    reports: web::Data<ReportService>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;
    let records = reports
        .all_attendance(
            query.employee_id.as_deref(),
            query.status,
            query.start_date,
            query.end_date,
        )
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Full attendance history for one employee, uncapped (manager)
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{id}",
    params(("id" = u64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Joined attendance records", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager only"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    auth: AuthUser,
    reports: web::Data<ReportService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;
    let records = reports.employee_attendance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Today's team snapshot (manager)
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    responses(
        (status = 200, description = "Team snapshot", body = TeamSummary),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager only"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn team_summary(
    auth: AuthUser,
    reports: web::Data<ReportService>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;
    let summary = reports.team_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Everyone with a record today, joined (manager)
#[utoipa::path(
    get,
    path = "/api/attendance/today-status",
    responses(
        (status = 200, description = "Today's joined records", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager only"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn today_roster(
    auth: AuthUser,
    reports: web::Data<ReportService>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;
    let records = reports.today_roster().await?;
    Ok(HttpResponse::Ok().json(records))
}

/// CSV export of filtered attendance, uncapped (manager)
#[utoipa::path(
    get,
    path = "/api/attendance/export",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager only"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn export_report(
    auth: AuthUser,
    reports: web::Data<ReportService>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;
    let rows = reports
        .export_records(
            query.employee_id.as_deref(),
            query.status,
            query.start_date,
            query.end_date,
        )
        .await?;

    let csv = render_csv(&rows).map_err(|e| {
        tracing::error!(error = %e, "csv rendering failed");
        actix_web::error::ErrorInternalServerError("Internal server error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ))
        .body(csv))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use serde_json::Value;

    use super::*;
    use crate::auth::auth::{EMPLOYEE_ID_HEADER, EMPLOYEE_ROLE_HEADER};
    use crate::config::Config;
    use crate::service::test_support::{ManualClock, at, base_day, seeded_directory};
    use crate::store::memory::{MemoryAttendanceStore, MemoryEmployeeDirectory};

    struct TestCtx {
        attendance: Data<AttendanceService>,
        reports: Data<ReportService>,
        clock: Arc<ManualClock>,
    }

    async fn ctx() -> TestCtx {
        let store = Arc::new(MemoryAttendanceStore::new());
        let directory: Arc<MemoryEmployeeDirectory> = Arc::new(seeded_directory().await);
        let clock = Arc::new(ManualClock::at(at(base_day(), 8, 45, 0)));
        TestCtx {
            attendance: Data::new(AttendanceService::new(store.clone(), clock.clone())),
            reports: Data::new(ReportService::new(store, directory, clock.clone())),
            clock,
        }
    }

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: "/api".to_string(),
            rate_attendance_per_min: 60_000,
            rate_export_per_min: 60_000,
            seed_demo_data: false,
        }
    }

    fn get(path: &str, employee_id: u64, role: &str) -> test::TestRequest {
        test::TestRequest::get()
            .uri(path)
            .peer_addr("127.0.0.1:9999".parse().unwrap())
            .insert_header((EMPLOYEE_ID_HEADER, employee_id.to_string()))
            .insert_header((EMPLOYEE_ROLE_HEADER, role))
    }

    fn post(path: &str, employee_id: u64, role: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(path)
            .peer_addr("127.0.0.1:9999".parse().unwrap())
            .insert_header((EMPLOYEE_ID_HEADER, employee_id.to_string()))
            .insert_header((EMPLOYEE_ROLE_HEADER, role))
    }

    macro_rules! app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data($ctx.attendance.clone())
                    .app_data($ctx.reports.clone())
                    .configure(|cfg| crate::routes::configure(cfg, test_config())),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn check_in_then_out_happy_path() {
        let ctx = ctx().await;
        let app = app!(ctx);

        let resp = test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "present");
        assert_eq!(body["employee_id"], 3);
        assert!(body["check_out_time"].is_null());

        ctx.clock.set(at(base_day(), 17, 30, 0));
        let resp = test::call_service(&app, post("/api/attendance/checkout", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total_hours"], 8.75);
        assert_eq!(body["status"], "present");
    }

    #[actix_web::test]
    async fn duplicate_check_in_yields_stable_error_kind() {
        let ctx = ctx().await;
        let app = app!(ctx);

        let resp = test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "already_checked_in");
        assert_eq!(body["message"], "Already checked in today");
    }

    #[actix_web::test]
    async fn checkout_without_check_in_is_bad_request() {
        let ctx = ctx().await;
        let app = app!(ctx);

        let resp = test::call_service(&app, post("/api/attendance/checkout", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "no_check_in_found");
    }

    #[actix_web::test]
    async fn missing_identity_headers_are_unauthorized() {
        let ctx = ctx().await;
        let app = app!(ctx);

        let req = test::TestRequest::get()
            .uri("/api/attendance/today")
            .peer_addr("127.0.0.1:9999".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn manager_routes_reject_employees() {
        let ctx = ctx().await;
        let app = app!(ctx);

        for path in [
            "/api/attendance/all",
            "/api/attendance/summary",
            "/api/attendance/today-status",
            "/api/attendance/export",
            "/api/attendance/employee/3",
            "/api/dashboard/manager",
        ] {
            let resp = test::call_service(&app, get(path, 3, "employee").to_request()).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "path {path}");
        }
    }

    #[actix_web::test]
    async fn team_summary_counts_roster() {
        let ctx = ctx().await;
        let app = app!(ctx);

        let resp = test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, get("/api/attendance/summary", 1, "manager").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total_employees"], 4);
        assert_eq!(body["present_today"], 1);
        assert_eq!(body["absent_today"], 3);
        let joined = body["today_attendance"].as_array().unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0]["employee"]["name"], "Jane Smith");
    }

    #[actix_web::test]
    async fn export_streams_a_csv_attachment() {
        let ctx = ctx().await;
        let app = app!(ctx);

        ctx.clock.set(at(base_day(), 9, 15, 0));
        test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;
        ctx.clock.set(at(base_day(), 17, 30, 0));
        test::call_service(&app, post("/api/attendance/checkout", 3, "employee").to_request()).await;

        let resp = test::call_service(&app, get("/api/attendance/export", 1, "manager").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()
                .get("Content-Disposition")
                .unwrap()
                .to_str()
                .unwrap()
                .contains(EXPORT_FILE_NAME)
        );

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("\"Employee Name\""));
        assert_eq!(
            lines.next().unwrap(),
            "\"Jane Smith\",\"EMP002\",\"3/16/2026\",\"late\",\"9:15:00 AM\",\"5:30:00 PM\",\"8.25h\""
        );
    }

    #[actix_web::test]
    async fn my_summary_defaults_to_current_month() {
        let ctx = ctx().await;
        let app = app!(ctx);

        test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;
        ctx.clock.set(at(base_day(), 17, 0, 0));
        test::call_service(&app, post("/api/attendance/checkout", 3, "employee").to_request()).await;

        let resp = test::call_service(&app, get("/api/attendance/my-summary", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["present"], 1);
        assert_eq!(body["total_hours"], 8.25);
    }

    #[actix_web::test]
    async fn employee_dashboard_reports_today() {
        let ctx = ctx().await;
        let app = app!(ctx);

        test::call_service(&app, post("/api/attendance/checkin", 3, "employee").to_request()).await;

        let resp = test::call_service(&app, get("/api/dashboard/employee", 3, "employee").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["today_status"]["status"], "present");
        assert_eq!(body["recent_attendance"].as_array().unwrap().len(), 1);
    }
}
