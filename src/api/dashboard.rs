use actix_web::{HttpResponse, Responder, web};

use crate::auth::auth::AuthUser;
use crate::service::reports::{EmployeeDashboard, ManagerDashboard, ReportService};

/// Personal dashboard: today's status, month-to-date summary, recent records
#[utoipa::path(
    get,
    path = "/api/dashboard/employee",
    responses(
        (status = 200, description = "Employee dashboard", body = EmployeeDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn employee_dashboard(
    auth: AuthUser,
    reports: web::Data<ReportService>,
) -> actix_web::Result<impl Responder> {
    let dashboard = reports.employee_dashboard(auth.employee_id).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Manager dashboard: totals, absent roster, weekly trend, department stats
#[utoipa::path(
    get,
    path = "/api/dashboard/manager",
    responses(
        (status = 200, description = "Manager dashboard", body = ManagerDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Manager only"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn manager_dashboard(
    auth: AuthUser,
    reports: web::Data<ReportService>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;
    let dashboard = reports.manager_dashboard().await?;
    Ok(HttpResponse::Ok().json(dashboard))
}
