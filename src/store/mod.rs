pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus, CheckoutUpdate, NewAttendance};
use crate::model::employee::{Employee, Role};

pub use memory::{MemoryAttendanceStore, MemoryEmployeeDirectory};

/// Failures at the storage boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record for this (employee, day) already exists. The state machine
    /// translates this to `AlreadyCheckedIn`; callers never see it raw.
    #[error("duplicate attendance record for employee {employee_id} on {day}")]
    DuplicateKey { employee_id: u64, day: NaiveDate },

    /// Opaque backend failure. Propagated unchanged, reported generically.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Filter for ranged attendance queries. Every populated field must match.
/// `limit: None` is the unbounded mode used by the exporter.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub employee_id: Option<u64>,
    pub status: Option<AttendanceStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

/// Home of attendance records and the single point of mutation
/// serialization. Uniqueness of (employee, day) is enforced here, not in the
/// state machine; the state machine treats `DuplicateKey` as "already
/// checked in".
#[async_trait]
pub trait AttendanceStore: Send + Sync + 'static {
    /// At most one record exists per (employee, day); a missing record is an
    /// empty result, not an error.
    async fn find_by_employee_and_day(
        &self,
        employee_id: u64,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Inserts a fresh record and assigns its id. Fails with `DuplicateKey`
    /// when a record for the same (employee, day) already exists.
    async fn create(&self, new: NewAttendance) -> Result<AttendanceRecord, StoreError>;

    /// Applies checkout fields iff `check_out_time` is still unset and
    /// returns the updated record. `None` means the swap failed: the record
    /// is missing or a concurrent checkout already completed it.
    async fn complete_checkout(
        &self,
        employee_id: u64,
        day: NaiveDate,
        update: CheckoutUpdate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Persists mutations to an existing record.
    async fn save(&self, record: &AttendanceRecord) -> Result<(), StoreError>;

    /// Records matching the filter, newest-first (day descending, id
    /// ascending within a day).
    async fn find_in_range(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// All records for one day, in insertion order.
    async fn find_all_on_day(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, StoreError>;
}

/// Read-only window into the external employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync + 'static {
    async fn find_by_id(&self, id: u64) -> Result<Option<Employee>, StoreError>;

    /// Lookup by business code (e.g. `EMP002`), as used on manager filters.
    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError>;

    /// Bulk lookup feeding the aggregation engine's join step.
    async fn find_by_ids(&self, ids: &[u64]) -> Result<Vec<Employee>, StoreError>;

    async fn count_by_role(&self, role: Role) -> Result<usize, StoreError>;

    /// Roster for one role, in stable id order.
    async fn list_by_role(&self, role: Role) -> Result<Vec<Employee>, StoreError>;

    /// Distinct departments among employees of the role, alphabetical.
    async fn distinct_departments(&self, role: Role) -> Result<Vec<String>, StoreError>;
}
