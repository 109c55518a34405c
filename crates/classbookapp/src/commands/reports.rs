use super::{fetched, CmdMessage, CmdResult};
use crate::aggregate::{class_overview, reports_to_csv, student_reports, ClassOverview, StudentReport};
use crate::error::Result;
use crate::store::Classroom;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    pub overview: ClassOverview,
    pub students: Vec<StudentReport>,
}

/// Per-student reports and the class overview built from them.
pub async fn class_report(room: &Classroom) -> Result<CmdResult<ClassReport>> {
    let (students, grades, attendance) = tokio::try_join!(
        fetched(room.students.get_all()),
        fetched(room.grades.get_all()),
        fetched(room.attendance.get_all()),
    )?;

    let reports = student_reports(&students, &grades, &attendance);
    let mut result = CmdResult::new(ClassReport {
        overview: class_overview(&reports),
        students: reports,
    });
    if result.value.students.is_empty() {
        result.add_message(CmdMessage::info("No students to report on"));
    }
    Ok(result)
}

/// The class report as CSV text, one line per student.
pub async fn export_csv(room: &Classroom, header: bool) -> Result<CmdResult<String>> {
    let report = class_report(room).await?.into_value();
    let csv = reports_to_csv(&report.students, header);
    let message = format!("Exported {} student report(s)", report.students.len());
    Ok(CmdResult::new(csv).with_message(CmdMessage::info(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceStatus, GradeLevel};
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::{TimeZone, Utc};

    fn classroom() -> Classroom {
        let at = |d| Utc.with_ymd_and_hms(2024, 3, d, 8, 0, 0).unwrap();
        StoreFixture::new()
            .with_student("Emma", "Johnson", GradeLevel::Tenth)
            .with_student("Liam", "Martinez", GradeLevel::Eleventh)
            .with_grade(1, 1, 90.0)
            .with_grade(1, 2, 80.0)
            .with_grade(2, 1, 70.0)
            .with_attendance(1, at(4), AttendanceStatus::Present)
            .with_attendance(2, at(4), AttendanceStatus::Absent)
            .with_attendance(2, at(5), AttendanceStatus::Late)
            .build()
    }

    #[tokio::test]
    async fn report_covers_every_student() {
        let room = classroom();
        let report = class_report(&room).await.unwrap().value;
        assert_eq!(report.students.len(), 2);
        assert_eq!(report.students[0].average_grade, 85.0);
        assert_eq!(report.students[1].missed_days, 1);
        assert_eq!(report.students[1].late_days, 1);
        assert_eq!(report.overview.total_students, 2);
        assert_eq!(report.overview.class_average, 77.5);
        assert_eq!(report.overview.attendance_rate, 50.0);
        assert_eq!(report.overview.total_assignments, 3);
    }

    #[tokio::test]
    async fn empty_class_reports_zeroes() {
        let result = class_report(&Classroom::in_memory()).await.unwrap();
        assert_eq!(result.value.overview, ClassOverview::default());
        assert_eq!(result.messages.len(), 1);
    }

    #[tokio::test]
    async fn csv_has_one_line_per_student() {
        let room = classroom();
        let csv = export_csv(&room, true).await.unwrap().value;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Emma Johnson,10,85.0,100.0,2");
        assert_eq!(lines[2], "Liam Martinez,11,70.0,0.0,1");
    }
}
