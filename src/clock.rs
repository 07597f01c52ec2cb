use chrono::{Local, NaiveDate, NaiveDateTime};

/// Workday begins at 09:00; checking in later marks the record late.
pub const WORK_START_HOUR: u32 = 9;

/// Attended days shorter than this many worked hours are downgraded to half-day.
pub const HALF_DAY_THRESHOLD_HOURS: f64 = 4.0;

/// Source of "now" for the attendance flows.
///
/// Injected into the services so state transitions are deterministic under
/// test without touching the real clock.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the organization's local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Truncates an instant to the start of its calendar day.
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDate {
    instant.date()
}

/// The 09:00:00 work-start boundary on the given day.
pub fn work_start(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(WORK_START_HOUR, 0, 0)
        .expect("work start is a valid time of day")
}

/// First and last calendar day of the given month, or `None` for an invalid
/// month/year pair.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}
