use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::employee::EmployeeRef;

/// Per-day attendance status, derived from arrival time and worked duration.
///
/// `absent` is never written by the check-in/check-out flow; it exists for
/// externally injected records and for aggregation output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
}

/// One attendance record per (employee, calendar day).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 17,
    "employee_id": 1002,
    "day": "2026-03-02",
    "check_in_time": "2026-03-02T08:52:10",
    "check_out_time": "2026-03-02T17:30:00",
    "status": "present",
    "total_hours": 8.63
}))]
pub struct AttendanceRecord {
    #[schema(example = 17)]
    pub id: u64,

    #[schema(example = 1002)]
    pub employee_id: u64,

    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub day: NaiveDate,

    #[schema(example = "2026-03-02T08:52:10", value_type = Option<String>, format = "date-time")]
    pub check_in_time: Option<NaiveDateTime>,

    #[schema(example = "2026-03-02T17:30:00", value_type = Option<String>, format = "date-time")]
    pub check_out_time: Option<NaiveDateTime>,

    pub status: AttendanceStatus,

    #[schema(example = 8.63)]
    pub total_hours: f64,
}

impl AttendanceRecord {
    /// Recomputes `total_hours` from the check-in/check-out pair, rounded to
    /// two decimals. Leaves the value untouched unless both timestamps are
    /// present.
    pub fn calculate_hours(&mut self) {
        if let (Some(check_in), Some(check_out)) = (self.check_in_time, self.check_out_time) {
            let millis = (check_out - check_in).num_milliseconds() as f64;
            self.total_hours = round_hours(millis / 3_600_000.0);
        }
    }
}

/// Rounds decimal hours half-up to two decimal places. Applied when a record
/// is completed and again at aggregation output; intermediate sums keep full
/// precision.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Insert payload for a first check-in; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee_id: u64,
    pub day: NaiveDate,
    pub check_in_time: NaiveDateTime,
    pub status: AttendanceStatus,
}

/// Checkout fields applied through the store's conditional update.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutUpdate {
    pub check_out_time: NaiveDateTime,
    pub total_hours: f64,
    pub status: AttendanceStatus,
}

/// Attendance row joined with its owner's directory entry at query time.
/// The stored record itself carries no denormalized employee fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceWithEmployee {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    /// `None` when the directory no longer knows the employee.
    pub employee: Option<EmployeeRef>,
}
