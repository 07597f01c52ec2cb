use anyhow::Context;

use crate::model::attendance::AttendanceWithEmployee;

/// File name suggested to clients downloading the export.
pub const EXPORT_FILE_NAME: &str = "attendance-report.csv";

const HEADERS: [&str; 7] = [
    "Employee Name",
    "Employee ID",
    "Date",
    "Status",
    "Check In",
    "Check Out",
    "Total Hours",
];

/// Renders joined attendance rows as a CSV document with every cell quoted.
///
/// Rows come out in input order; filtering and capping happen upstream in
/// `ReportService`, never here. A row whose employee is unknown to the
/// directory renders `N/A` for the name and id cells; missing check times
/// render `-`, and so do zero hours.
pub fn render_csv(rows: &[AttendanceWithEmployee]) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS).context("write csv header")?;
    for row in rows {
        writer
            .write_record(render_row(row))
            .context("write csv row")?;
    }

    let bytes = writer.into_inner().context("flush csv writer")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

fn render_row(row: &AttendanceWithEmployee) -> [String; 7] {
    let (name, code) = match &row.employee {
        Some(employee) => (employee.name.clone(), employee.employee_code.clone()),
        None => ("N/A".to_string(), "N/A".to_string()),
    };
    let record = &row.record;

    [
        name,
        code,
        record.day.format("%-m/%-d/%Y").to_string(),
        record.status.to_string(),
        format_time(record.check_in_time),
        format_time(record.check_out_time),
        format_hours(record.total_hours),
    ]
}

fn format_time(time: Option<chrono::NaiveDateTime>) -> String {
    match time {
        Some(t) => t.format("%-I:%M:%S %p").to_string(),
        None => "-".to_string(),
    }
}

fn format_hours(hours: f64) -> String {
    if hours == 0.0 {
        "-".to_string()
    } else {
        format!("{hours}h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::model::employee::EmployeeRef;
    use chrono::NaiveDate;

    fn jane() -> EmployeeRef {
        EmployeeRef {
            id: 2,
            name: "Jane Smith".into(),
            email: "emp2@company.com".into(),
            employee_code: "EMP002".into(),
            department: "Engineering".into(),
        }
    }

    fn full_day_row() -> AttendanceWithEmployee {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        AttendanceWithEmployee {
            record: AttendanceRecord {
                id: 1,
                employee_id: 2,
                day,
                check_in_time: day.and_hms_opt(9, 15, 0),
                check_out_time: day.and_hms_opt(17, 30, 0),
                status: AttendanceStatus::Late,
                total_hours: 8.25,
            },
            employee: Some(jane()),
        }
    }

    #[test]
    fn renders_complete_row_with_quoted_cells() {
        let csv = render_csv(&[full_day_row()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Employee Name\",\"Employee ID\",\"Date\",\"Status\",\"Check In\",\"Check Out\",\"Total Hours\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Jane Smith\",\"EMP002\",\"3/2/2026\",\"late\",\"9:15:00 AM\",\"5:30:00 PM\",\"8.25h\""
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn open_record_renders_placeholders() {
        let mut row = full_day_row();
        row.record.check_out_time = None;
        row.record.total_hours = 0.0;
        row.record.status = AttendanceStatus::Present;

        let csv = render_csv(&[row]).unwrap();
        let data_line = csv.lines().nth(1).unwrap();
        assert_eq!(
            data_line,
            "\"Jane Smith\",\"EMP002\",\"3/2/2026\",\"present\",\"9:15:00 AM\",\"-\",\"-\""
        );
    }

    #[test]
    fn unknown_employee_renders_na() {
        let mut row = full_day_row();
        row.employee = None;

        let csv = render_csv(&[row]).unwrap();
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.starts_with("\"N/A\",\"N/A\","));
    }

    #[test]
    fn whole_hours_render_without_trailing_zeroes() {
        let mut row = full_day_row();
        row.record.total_hours = 8.0;

        let csv = render_csv(&[row]).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("\"8h\""));
    }

    #[test]
    fn preserves_input_order_and_never_filters() {
        let mut first = full_day_row();
        first.record.id = 10;
        let mut second = full_day_row();
        second.record.id = 3;
        second.record.status = AttendanceStatus::HalfDay;
        second.record.total_hours = 2.17;

        let csv = render_csv(&[first, second]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("\"half-day\""));
        assert!(lines[2].ends_with("\"2.17h\""));
    }

    #[test]
    fn empty_input_yields_header_only() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
