//! Shared fixtures for the service test suites.

use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::Clock;
use crate::model::employee::{Employee, Role};
use crate::store::memory::MemoryEmployeeDirectory;

/// Clock whose "now" is set by the test and advanced explicitly, so
/// check-in/check-out pairs land at exact instants.
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

/// A weekday far from month boundaries, so "this month" windows behave.
pub fn base_day() -> NaiveDate {
    // Monday 2026-03-16.
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, min, sec).unwrap()
}

pub fn employee(id: u64, code: &str, name: &str, department: &str) -> Employee {
    Employee {
        id,
        employee_code: code.to_string(),
        name: name.to_string(),
        email: format!("{}@company.com", code.to_lowercase()),
        role: Role::Employee,
        department: department.to_string(),
    }
}

/// 1 manager + 4 employees across Engineering and Sales.
pub async fn seeded_directory() -> MemoryEmployeeDirectory {
    let directory = MemoryEmployeeDirectory::new();
    directory
        .insert(Employee {
            role: Role::Manager,
            ..employee(1, "MGR001", "Manager User", "Management")
        })
        .await;
    directory
        .insert(employee(2, "EMP001", "John Doe", "Engineering"))
        .await;
    directory
        .insert(employee(3, "EMP002", "Jane Smith", "Engineering"))
        .await;
    directory
        .insert(employee(4, "EMP003", "Bob Johnson", "Sales"))
        .await;
    directory
        .insert(employee(5, "EMP004", "Alice Williams", "Engineering"))
        .await;
    directory
}
