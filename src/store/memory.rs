use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::model::attendance::{AttendanceRecord, CheckoutUpdate, NewAttendance};
use crate::model::employee::{Employee, Role};
use crate::store::{AttendanceFilter, AttendanceStore, EmployeeDirectory, StoreError};

/// In-memory attendance store.
///
/// Records are keyed by (employee, day), so the uniqueness invariant is
/// structural: a second insert for the same key can only ever fail. A single
/// `RwLock` serializes mutation, which makes `create` and
/// `complete_checkout` atomic with respect to each other.
pub struct MemoryAttendanceStore {
    records: RwLock<HashMap<(u64, NaiveDate), AttendanceRecord>>,
    next_id: AtomicU64,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryAttendanceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn find_by_employee_and_day(
        &self,
        employee_id: u64,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&(employee_id, day)).cloned())
    }

    async fn create(&self, new: NewAttendance) -> Result<AttendanceRecord, StoreError> {
        let mut records = self.records.write().await;
        let key = (new.employee_id, new.day);
        if records.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                employee_id: new.employee_id,
                day: new.day,
            });
        }

        let record = AttendanceRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            employee_id: new.employee_id,
            day: new.day,
            check_in_time: Some(new.check_in_time),
            check_out_time: None,
            status: new.status,
            total_hours: 0.0,
        };
        records.insert(key, record.clone());
        Ok(record)
    }

    async fn complete_checkout(
        &self,
        employee_id: u64,
        day: NaiveDate,
        update: CheckoutUpdate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&(employee_id, day)) {
            Some(record) if record.check_out_time.is_none() => {
                record.check_out_time = Some(update.check_out_time);
                record.total_hours = update.total_hours;
                record.status = update.status;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn save(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let key = (record.employee_id, record.day);
        match records.get_mut(&key) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "no attendance record for employee {} on {}",
                record.employee_id, record.day
            ))),
        }
    }

    async fn find_in_range(
        &self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matched: Vec<AttendanceRecord> = records
            .values()
            .filter(|r| filter.employee_id.is_none_or(|id| r.employee_id == id))
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| filter.from.is_none_or(|from| r.day >= from))
            .filter(|r| filter.to.is_none_or(|to| r.day <= to))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.day.cmp(&a.day).then(a.id.cmp(&b.id)));
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn find_all_on_day(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matched: Vec<AttendanceRecord> = records
            .values()
            .filter(|r| r.day == day)
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.id);
        Ok(matched)
    }
}

/// In-memory stand-in for the external employee directory. Populated by the
/// demo seeder; the service itself only reads it.
pub struct MemoryEmployeeDirectory {
    employees: RwLock<HashMap<u64, Employee>>,
}

impl MemoryEmployeeDirectory {
    pub fn new() -> Self {
        Self {
            employees: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an employee. Not part of `EmployeeDirectory`: the contract
    /// is read-only, ownership of the roster stays outside this service.
    pub async fn insert(&self, employee: Employee) {
        let mut employees = self.employees.write().await;
        employees.insert(employee.id, employee);
    }
}

impl Default for MemoryEmployeeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryEmployeeDirectory {
    async fn find_by_id(&self, id: u64) -> Result<Option<Employee>, StoreError> {
        let employees = self.employees.read().await;
        Ok(employees.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Employee>, StoreError> {
        let employees = self.employees.read().await;
        Ok(employees.values().find(|e| e.employee_code == code).cloned())
    }

    async fn find_by_ids(&self, ids: &[u64]) -> Result<Vec<Employee>, StoreError> {
        let employees = self.employees.read().await;
        Ok(ids.iter().filter_map(|id| employees.get(id).cloned()).collect())
    }

    async fn count_by_role(&self, role: Role) -> Result<usize, StoreError> {
        let employees = self.employees.read().await;
        Ok(employees.values().filter(|e| e.role == role).count())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Employee>, StoreError> {
        let employees = self.employees.read().await;
        let mut roster: Vec<Employee> = employees
            .values()
            .filter(|e| e.role == role)
            .cloned()
            .collect();
        roster.sort_by_key(|e| e.id);
        Ok(roster)
    }

    async fn distinct_departments(&self, role: Role) -> Result<Vec<String>, StoreError> {
        let employees = self.employees.read().await;
        let departments: BTreeSet<String> = employees
            .values()
            .filter(|e| e.role == role)
            .map(|e| e.department.clone())
            .collect();
        Ok(departments.into_iter().collect())
    }
}
