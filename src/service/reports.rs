use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::clock::{self, Clock};
use crate::error::AttendanceError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, AttendanceWithEmployee, round_hours,
};
use crate::model::employee::{Employee, EmployeeRef, Role};
use crate::store::{AttendanceFilter, AttendanceStore, EmployeeDirectory, StoreError};

/// Manager-wide attendance queries are capped at this many records.
pub const MANAGER_QUERY_LIMIT: usize = 500;

/// Days covered by the manager dashboard trend, today included.
pub const WEEKLY_TREND_DAYS: usize = 5;

/// Calendar window of the employee dashboard's recent history:
/// today − 7 .. today inclusive.
const RECENT_HISTORY_DAYS: i64 = 7;

/// Per-status counts plus the hours sum over a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 18)]
    pub present: usize,
    /// Counted literally from stored records; the check-in/out flow never
    /// writes an `absent` record, so this stays 0 unless records are
    /// injected from outside.
    #[schema(example = 0)]
    pub absent: usize,
    #[schema(example = 3)]
    pub late: usize,
    #[schema(example = 1)]
    pub half_day: usize,
    #[schema(example = 172.45)]
    pub total_hours: f64,
}

/// Same-day presence counts over the employee roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCounts {
    pub present_today: usize,
    pub absent_today: usize,
    pub late_today: usize,
}

/// Team snapshot for one day, joined with the day's records.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSummary {
    #[schema(example = 8)]
    pub total_employees: usize,
    #[schema(example = 6)]
    pub present_today: usize,
    #[schema(example = 2)]
    pub absent_today: usize,
    #[schema(example = 1)]
    pub late_today: usize,
    pub today_attendance: Vec<AttendanceWithEmployee>,
}

/// One day of the weekly trend.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrendPoint {
    /// Short weekday label, e.g. `Mon`.
    #[schema(example = "Mon")]
    pub day: String,
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = 6)]
    pub present: usize,
}

/// Headcount vs. presence for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentStat {
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 4)]
    pub total: usize,
    #[schema(example = 3)]
    pub present: usize,
}

/// Everything the manager dashboard shows for today.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManagerDashboard {
    pub total_employees: usize,
    pub present_today: usize,
    pub absent_today: usize,
    pub late_today: usize,
    pub absent_employees: Vec<EmployeeRef>,
    pub weekly_trend: Vec<TrendPoint>,
    pub department_stats: Vec<DepartmentStat>,
    pub today_attendance: Vec<AttendanceWithEmployee>,
}

/// Everything the employee dashboard shows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeDashboard {
    pub today_status: Option<AttendanceRecord>,
    pub month_summary: AttendanceSummary,
    pub recent_attendance: Vec<AttendanceRecord>,
}

// ---- Pure reducers -------------------------------------------------------
//
// Everything below operates on plain record sets plus a roster; no store
// access, no hidden state. `ReportService` orchestrates the reads and the
// employee join, then hands the data here.

/// Per-status counts and the hours sum. Hours keep full precision while
/// summing and are rounded once at the output edge.
pub fn summarize(records: &[AttendanceRecord]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    let mut hours = 0.0;
    for record in records {
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
            AttendanceStatus::HalfDay => summary.half_day += 1,
        }
        hours += record.total_hours;
    }
    summary.total_hours = round_hours(hours);
    summary
}

/// Same-day presence counts. Everyone with a record counts as present for
/// the day, late arrivals included; absence is the roster remainder, so
/// `present_today + absent_today` equals the headcount for any subset of
/// check-ins.
pub fn team_counts(total_employees: usize, day_records: &[AttendanceWithEmployee]) -> TeamCounts {
    let present_today = day_records.len();
    let late_today = day_records
        .iter()
        .filter(|j| j.record.status == AttendanceStatus::Late)
        .count();
    TeamCounts {
        present_today,
        absent_today: total_employees.saturating_sub(present_today),
        late_today,
    }
}

/// Roster members without a record on the day, by id, in roster order.
/// Absence is derived here by set-subtraction, never stored.
pub fn absent_roster(
    roster: &[Employee],
    day_records: &[AttendanceWithEmployee],
) -> Vec<EmployeeRef> {
    let present: HashSet<u64> = day_records.iter().map(|j| j.record.employee_id).collect();
    roster
        .iter()
        .filter(|e| !present.contains(&e.id))
        .map(EmployeeRef::from)
        .collect()
}

/// Record count per day for the `days` calendar days ending at `today`,
/// oldest first, labeled with the short weekday name. Weekend days are
/// reported like any other day.
pub fn weekly_trend(today: NaiveDate, days: usize, records: &[AttendanceRecord]) -> Vec<TrendPoint> {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for record in records {
        *per_day.entry(record.day).or_default() += 1;
    }
    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset as i64);
            TrendPoint {
                day: date.format("%a").to_string(),
                date,
                present: per_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Headcount vs. today's presence per department. Presence is matched via
/// the joined employee reference, not any field stored on the record.
pub fn department_snapshot(
    departments: &[String],
    roster: &[Employee],
    day_records: &[AttendanceWithEmployee],
) -> Vec<DepartmentStat> {
    departments
        .iter()
        .map(|department| {
            let total = roster
                .iter()
                .filter(|e| &e.department == department)
                .count();
            let present = day_records
                .iter()
                .filter(|j| {
                    j.employee
                        .as_ref()
                        .is_some_and(|e| &e.department == department)
                })
                .count();
            DepartmentStat {
                department: department.clone(),
                total,
                present,
            }
        })
        .collect()
}

/// Joins records with their owners' directory entries. A record whose
/// employee is unknown to the directory keeps an empty reference rather
/// than failing.
pub async fn join_employees(
    directory: &dyn EmployeeDirectory,
    records: Vec<AttendanceRecord>,
) -> Result<Vec<AttendanceWithEmployee>, StoreError> {
    let ids: Vec<u64> = records
        .iter()
        .map(|r| r.employee_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let by_id: HashMap<u64, Employee> = directory
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    Ok(records
        .into_iter()
        .map(|record| {
            let employee = by_id.get(&record.employee_id).map(EmployeeRef::from);
            AttendanceWithEmployee { record, employee }
        })
        .collect())
}

// ---- Orchestration -------------------------------------------------------

/// Read-side engine: pulls record ranges and roster data, joins them, and
/// reduces them into summaries, snapshots and dashboards.
pub struct ReportService {
    store: Arc<dyn AttendanceStore>,
    directory: Arc<dyn EmployeeDirectory>,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        directory: Arc<dyn EmployeeDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            directory,
            clock,
        }
    }

    /// Month summary of one employee's stored records. Month and year
    /// default to the current ones.
    pub async fn personal_summary(
        &self,
        employee_id: u64,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<AttendanceSummary, AttendanceError> {
        let today = self.clock.today();
        let month = month.unwrap_or_else(|| today.month());
        let year = year.unwrap_or_else(|| today.year());
        let Some((from, to)) = clock::month_bounds(year, month) else {
            // Out-of-range year: nothing can match.
            return Ok(AttendanceSummary::default());
        };

        let records = self
            .store
            .find_in_range(&AttendanceFilter {
                employee_id: Some(employee_id),
                from: Some(from),
                to: Some(to),
                ..Default::default()
            })
            .await?;
        Ok(summarize(&records))
    }

    /// Today's team snapshot plus the joined day records.
    pub async fn team_summary(&self) -> Result<TeamSummary, AttendanceError> {
        let today = self.clock.today();
        let total_employees = self.directory.count_by_role(Role::Employee).await?;
        let day_records = self.store.find_all_on_day(today).await?;
        let joined = join_employees(self.directory.as_ref(), day_records).await?;
        let counts = team_counts(total_employees, &joined);

        Ok(TeamSummary {
            total_employees,
            present_today: counts.present_today,
            absent_today: counts.absent_today,
            late_today: counts.late_today,
            today_attendance: joined,
        })
    }

    /// Today's records across all employees, joined.
    pub async fn today_roster(&self) -> Result<Vec<AttendanceWithEmployee>, AttendanceError> {
        let today = self.clock.today();
        let day_records = self.store.find_all_on_day(today).await?;
        Ok(join_employees(self.directory.as_ref(), day_records).await?)
    }

    /// Manager-wide filtered attendance, joined, capped at
    /// [`MANAGER_QUERY_LIMIT`].
    pub async fn all_attendance(
        &self,
        employee_code: Option<&str>,
        status: Option<AttendanceStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceWithEmployee>, AttendanceError> {
        self.filtered(employee_code, status, from, to, Some(MANAGER_QUERY_LIMIT))
            .await
    }

    /// Uncapped filtered attendance for the exporter. Filtering stays here;
    /// the exporter itself never filters.
    pub async fn export_records(
        &self,
        employee_code: Option<&str>,
        status: Option<AttendanceStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceWithEmployee>, AttendanceError> {
        self.filtered(employee_code, status, from, to, None).await
    }

    /// One employee's full history, joined, uncapped.
    pub async fn employee_attendance(
        &self,
        employee_id: u64,
    ) -> Result<Vec<AttendanceWithEmployee>, AttendanceError> {
        let records = self
            .store
            .find_in_range(&AttendanceFilter {
                employee_id: Some(employee_id),
                ..Default::default()
            })
            .await?;
        Ok(join_employees(self.directory.as_ref(), records).await?)
    }

    /// Today's totals, the absent roster, the weekly trend and the
    /// per-department stats in one shot.
    pub async fn manager_dashboard(&self) -> Result<ManagerDashboard, AttendanceError> {
        let today = self.clock.today();
        let total_employees = self.directory.count_by_role(Role::Employee).await?;
        let day_records = self.store.find_all_on_day(today).await?;
        let joined = join_employees(self.directory.as_ref(), day_records).await?;
        let counts = team_counts(total_employees, &joined);

        let roster = self.directory.list_by_role(Role::Employee).await?;
        let absent_employees = absent_roster(&roster, &joined);

        let trend_from = today - Duration::days(WEEKLY_TREND_DAYS as i64 - 1);
        let trend_records = self
            .store
            .find_in_range(&AttendanceFilter {
                from: Some(trend_from),
                to: Some(today),
                ..Default::default()
            })
            .await?;
        let weekly_trend = weekly_trend(today, WEEKLY_TREND_DAYS, &trend_records);

        let departments = self.directory.distinct_departments(Role::Employee).await?;
        let department_stats = department_snapshot(&departments, &roster, &joined);

        Ok(ManagerDashboard {
            total_employees,
            present_today: counts.present_today,
            absent_today: counts.absent_today,
            late_today: counts.late_today,
            absent_employees,
            weekly_trend,
            department_stats,
            today_attendance: joined,
        })
    }

    /// Today's status, the month-to-date summary and the recent history for
    /// one employee.
    pub async fn employee_dashboard(
        &self,
        employee_id: u64,
    ) -> Result<EmployeeDashboard, AttendanceError> {
        let today = self.clock.today();
        let today_status = self
            .store
            .find_by_employee_and_day(employee_id, today)
            .await?;

        let month_start = today.with_day(1).unwrap_or(today);
        let month_records = self
            .store
            .find_in_range(&AttendanceFilter {
                employee_id: Some(employee_id),
                from: Some(month_start),
                to: Some(today),
                ..Default::default()
            })
            .await?;
        let month_summary = summarize(&month_records);

        let recent_attendance = self
            .store
            .find_in_range(&AttendanceFilter {
                employee_id: Some(employee_id),
                from: Some(today - Duration::days(RECENT_HISTORY_DAYS)),
                to: Some(today),
                ..Default::default()
            })
            .await?;

        Ok(EmployeeDashboard {
            today_status,
            month_summary,
            recent_attendance,
        })
    }

    async fn filtered(
        &self,
        employee_code: Option<&str>,
        status: Option<AttendanceStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<AttendanceWithEmployee>, AttendanceError> {
        let employee_id = match employee_code {
            Some(code) => match self.directory.find_by_code(code).await? {
                Some(employee) => Some(employee.id),
                // An unresolvable code matches nothing.
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let records = self
            .store
            .find_in_range(&AttendanceFilter {
                employee_id,
                status,
                from,
                to,
                limit,
            })
            .await?;
        Ok(join_employees(self.directory.as_ref(), records).await?)
    }
}
