use std::sync::Arc;

use crate::clock::{self, Clock, HALF_DAY_THRESHOLD_HOURS};
use crate::error::AttendanceError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, CheckoutUpdate, NewAttendance, round_hours,
};
use crate::store::{AttendanceFilter, AttendanceStore, StoreError};

/// Personal history responses are capped at this many records.
pub const PERSONAL_HISTORY_LIMIT: usize = 100;

/// Drives the per-(employee, day) state machine:
/// `NoRecord → CheckedIn → CheckedOut`, with `CheckedOut` terminal.
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// `NoRecord → CheckedIn`.
    ///
    /// Arrival strictly after the 09:00 boundary marks the record late.
    /// The store's uniqueness constraint is the authoritative duplicate
    /// guard: the pre-check and the insert are not atomic together, so a
    /// `DuplicateKey` at insert time is the same outcome as the pre-check
    /// finding a record.
    pub async fn check_in(&self, employee_id: u64) -> Result<AttendanceRecord, AttendanceError> {
        let now = self.clock.now();
        let today = clock::start_of_day(now);

        if self
            .store
            .find_by_employee_and_day(employee_id, today)
            .await?
            .is_some()
        {
            return Err(AttendanceError::AlreadyCheckedIn);
        }

        let status = if now > clock::work_start(today) {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let new = NewAttendance {
            employee_id,
            day: today,
            check_in_time: now,
            status,
        };
        match self.store.create(new).await {
            Ok(record) => Ok(record),
            Err(StoreError::DuplicateKey { .. }) => Err(AttendanceError::AlreadyCheckedIn),
            Err(err) => Err(err.into()),
        }
    }

    /// `CheckedIn → CheckedOut`.
    ///
    /// Recomputes the worked hours and downgrades the status to half-day
    /// below the 4-hour threshold; the downgrade overrides whatever
    /// check-in decided and is final. The conditional store update is the
    /// race guard: losing the swap means another checkout already completed
    /// this record.
    pub async fn check_out(&self, employee_id: u64) -> Result<AttendanceRecord, AttendanceError> {
        let now = self.clock.now();
        let today = clock::start_of_day(now);

        let record = self
            .store
            .find_by_employee_and_day(employee_id, today)
            .await?
            .ok_or(AttendanceError::NoCheckInFound)?;

        if record.check_out_time.is_some() {
            return Err(AttendanceError::AlreadyCheckedOut);
        }
        let check_in_time = record
            .check_in_time
            .ok_or(AttendanceError::NoCheckInFound)?;

        let millis = (now - check_in_time).num_milliseconds() as f64;
        let total_hours = round_hours(millis / 3_600_000.0);
        let status = if total_hours < HALF_DAY_THRESHOLD_HOURS {
            AttendanceStatus::HalfDay
        } else {
            record.status
        };

        let update = CheckoutUpdate {
            check_out_time: now,
            total_hours,
            status,
        };
        self.store
            .complete_checkout(employee_id, today, update)
            .await?
            .ok_or(AttendanceError::AlreadyCheckedOut)
    }

    /// Today's record for the employee, if any.
    pub async fn today_status(
        &self,
        employee_id: u64,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let today = self.clock.today();
        Ok(self
            .store
            .find_by_employee_and_day(employee_id, today)
            .await?)
    }

    /// Personal history, newest-first, optionally narrowed to one month
    /// (`(year, month)`, already validated by the caller), capped at
    /// [`PERSONAL_HISTORY_LIMIT`].
    pub async fn personal_history(
        &self,
        employee_id: u64,
        month: Option<(i32, u32)>,
    ) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let mut filter = AttendanceFilter {
            employee_id: Some(employee_id),
            limit: Some(PERSONAL_HISTORY_LIMIT),
            ..Default::default()
        };
        if let Some((year, month)) = month {
            match clock::month_bounds(year, month) {
                Some((from, to)) => {
                    filter.from = Some(from);
                    filter.to = Some(to);
                }
                // Out-of-range year: nothing can match.
                None => return Ok(Vec::new()),
            }
        }
        Ok(self.store.find_in_range(&filter).await?)
    }
}
