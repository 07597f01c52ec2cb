use crate::store::StoreError;

/// Domain failures of the attendance state machine.
///
/// Every variant except `Store` is user-correctable: the operation is
/// rejected, nothing changes, and the caller gets a stable kind plus a
/// human-readable message. Store failures are opaque infrastructure errors
/// and are surfaced generically at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Already checked in today")]
    AlreadyCheckedIn,

    #[error("No check-in found for today")]
    NoCheckInFound,

    #[error("Already checked out today")]
    AlreadyCheckedOut,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AttendanceError {
    /// Stable machine-checkable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AttendanceError::AlreadyCheckedIn => "already_checked_in",
            AttendanceError::NoCheckInFound => "no_check_in_found",
            AttendanceError::AlreadyCheckedOut => "already_checked_out",
            AttendanceError::Store(_) => "store_failure",
        }
    }
}
