use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{self, HALF_DAY_THRESHOLD_HOURS};
use crate::model::attendance::{AttendanceStatus, CheckoutUpdate, NewAttendance, round_hours};
use crate::model::employee::{Employee, Role};
use crate::store::memory::MemoryEmployeeDirectory;
use crate::store::AttendanceStore;

const ROSTER: [(&str, &str, &str, &str); 9] = [
    ("MGR001", "Manager User", "manager", "Management"),
    ("EMP001", "John Doe", "employee", "Engineering"),
    ("EMP002", "Jane Smith", "employee", "Engineering"),
    ("EMP003", "Bob Johnson", "employee", "Sales"),
    ("EMP004", "Alice Williams", "employee", "Engineering"),
    ("EMP005", "Charlie Brown", "employee", "Sales"),
    ("EMP006", "Diana Prince", "employee", "Engineering"),
    ("EMP007", "Eve Davis", "employee", "Sales"),
    ("EMP008", "Frank Miller", "employee", "Engineering"),
];

/// Seed days of history, today included.
const SEED_DAYS: i64 = 30;

/// Fills the demo roster and roughly a month of weekday attendance.
///
/// Check-ins land between 08:00 and 09:59, checkouts between 17:00 and
/// 18:59, at a ~90% attendance rate; statuses come from the same rules the
/// state machine applies. Weekends get no records, which is why the weekly
/// trend legitimately reports zero-count days.
pub async fn seed_demo_data(
    store: &dyn AttendanceStore,
    directory: &MemoryEmployeeDirectory,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let mut employees = Vec::new();
    for (idx, (code, name, role, department)) in ROSTER.iter().enumerate() {
        let employee = Employee {
            id: idx as u64 + 1,
            employee_code: code.to_string(),
            name: name.to_string(),
            email: format!("{}@company.com", code.to_lowercase()),
            role: if *role == "manager" {
                Role::Manager
            } else {
                Role::Employee
            },
            department: department.to_string(),
        };
        directory.insert(employee.clone()).await;
        if employee.role == Role::Employee {
            employees.push(employee);
        }
    }
    log::info!("Seeded {} demo employees", ROSTER.len());

    let mut rng = StdRng::from_entropy();
    let mut records = 0usize;
    for offset in (0..SEED_DAYS).rev() {
        let day = today - Duration::days(offset);
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        for employee in &employees {
            // 90% attendance rate.
            if rng.gen_bool(0.1) {
                continue;
            }

            let check_in = day
                .and_hms_opt(8 + rng.gen_range(0..2), rng.gen_range(0..60), 0)
                .expect("seed check-in is a valid time");
            let check_out = day
                .and_hms_opt(17 + rng.gen_range(0..2), rng.gen_range(0..60), 0)
                .expect("seed check-out is a valid time");

            let total_hours =
                round_hours((check_out - check_in).num_milliseconds() as f64 / 3_600_000.0);
            let arrival_status = if check_in > clock::work_start(day) {
                AttendanceStatus::Late
            } else {
                AttendanceStatus::Present
            };
            let status = if total_hours < HALF_DAY_THRESHOLD_HOURS {
                AttendanceStatus::HalfDay
            } else {
                arrival_status
            };

            store
                .create(NewAttendance {
                    employee_id: employee.id,
                    day,
                    check_in_time: check_in,
                    status: arrival_status,
                })
                .await?;
            store
                .complete_checkout(
                    employee.id,
                    day,
                    CheckoutUpdate {
                        check_out_time: check_out,
                        total_hours,
                        status,
                    },
                )
                .await?;
            records += 1;
        }
    }

    log::info!("Seeded {records} demo attendance records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryAttendanceStore;
    use crate::store::{AttendanceFilter, EmployeeDirectory};

    #[tokio::test]
    async fn seeds_roster_and_weekday_records() {
        let store = MemoryAttendanceStore::new();
        let directory = MemoryEmployeeDirectory::new();
        let today = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();

        seed_demo_data(&store, &directory, today).await.unwrap();

        assert_eq!(directory.count_by_role(Role::Employee).await.unwrap(), 8);
        assert_eq!(directory.count_by_role(Role::Manager).await.unwrap(), 1);
        assert_eq!(
            directory.distinct_departments(Role::Employee).await.unwrap(),
            vec!["Engineering".to_string(), "Sales".to_string()]
        );

        let all = store
            .find_in_range(&AttendanceFilter::default())
            .await
            .unwrap();
        assert!(!all.is_empty());
        for record in &all {
            assert!(!matches!(
                record.day.weekday(),
                Weekday::Sat | Weekday::Sun
            ));
            assert!(record.check_out_time.is_some());
            assert!(record.total_hours > HALF_DAY_THRESHOLD_HOURS);
            assert_ne!(record.status, AttendanceStatus::HalfDay);
            assert!(record.day > today - Duration::days(SEED_DAYS));
            assert!(record.day <= today);
        }
    }
}
