use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceWithEmployee};
use crate::model::employee::{Employee, EmployeeRef, Role};
use crate::service::reports::{
    AttendanceSummary, DepartmentStat, EmployeeDashboard, ManagerDashboard, TeamSummary,
    TrendPoint,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Management API",
        version = "1.0.0",
        description = r#"
## Attendance Management Service

This API tracks **employee daily attendance**: check-in/check-out events, the
per-day status derived from them, and the aggregates managers see.

### 🔹 Key Features
- **Check-in / Check-out**
  - One record per employee per day; late arrival and half-day detection
- **Personal Views**
  - History, monthly summaries, today's status, a personal dashboard
- **Manager Views**
  - Team snapshot, absent roster, weekly trend, department stats
- **Reporting**
  - Filtered queries and CSV export of the full history

### 🔐 Identity
Every request carries the authenticated identity in the trusted gateway
headers `X-Employee-Id` and `X-Employee-Role`; manager-only routes reject
other roles.

### 📦 Response Format
- JSON-based RESTful responses
- CSV attachment on the export endpoint

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::my_history,
        crate::api::attendance::my_summary,
        crate::api::attendance::today,
        crate::api::attendance::all_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::team_summary,
        crate::api::attendance::today_roster,
        crate::api::attendance::export_report,

        crate::api::dashboard::employee_dashboard,
        crate::api::dashboard::manager_dashboard
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            AttendanceWithEmployee,
            AttendanceSummary,
            TeamSummary,
            TrendPoint,
            DepartmentStat,
            ManagerDashboard,
            EmployeeDashboard,
            Employee,
            EmployeeRef,
            Role
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in/check-out and attendance queries"),
        (name = "Dashboard", description = "Employee and manager dashboards"),
    )
)]
pub struct ApiDoc;
