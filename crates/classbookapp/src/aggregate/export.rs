use super::stats::StudentReport;

pub const CSV_HEADER: &str = "name,grade,average_grade,attendance_rate,assignments";

/// One line per report: `First Last,grade,average,rate,assignments`, numbers to one
/// decimal place, lines joined by `\n` with no trailing newline.
pub fn reports_to_csv(reports: &[StudentReport], header: bool) -> String {
    let rows = reports.iter().map(|r| {
        format!(
            "{},{},{:.1},{:.1},{}",
            r.student.full_name(),
            r.student.grade,
            r.average_grade,
            r.attendance_rate,
            r.total_assignments
        )
    });

    if header {
        std::iter::once(CSV_HEADER.to_string())
            .chain(rows)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        rows.collect::<Vec<_>>().join("\n")
    }
}
