use crate::model::{Attendance, AttendanceStatus, Grade, Id, Student};
use serde::Serialize;
use std::collections::HashSet;

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn present_share<'a>(records: impl Iterator<Item = &'a Attendance>) -> f64 {
    let (present, total) = records.fold((0usize, 0usize), |(p, t), a| {
        (p + usize::from(a.status == AttendanceStatus::Present), t + 1)
    });
    if total == 0 {
        0.0
    } else {
        present as f64 / total as f64 * 100.0
    }
}

/// Mean score over the student's grades. 0 when there are none.
pub fn average_grade(grades: &[Grade], student_id: Id) -> f64 {
    mean(
        grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .map(|g| g.score),
    )
}

/// Percentage of the student's attendance records marked present. 0 when there are none.
pub fn attendance_rate(records: &[Attendance], student_id: Id) -> f64 {
    present_share(records.iter().filter(|a| a.student_id == student_id))
}

/// Mean of per-student average grades. 0 for an empty roster.
pub fn class_average(students: &[Student], grades: &[Grade]) -> f64 {
    mean(students.iter().map(|s| average_grade(grades, s.id)))
}

/// Score as a percentage of the points available. 0 when nothing is available.
pub fn percentage(score: f64, total_points: f64) -> f64 {
    if total_points > 0.0 {
        score / total_points * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => LetterGrade::A,
            s if s >= 80.0 => LetterGrade::B,
            s if s >= 70.0 => LetterGrade::C,
            s if s >= 60.0 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Everything the reports page shows for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub student: Student,
    pub average_grade: f64,
    pub attendance_rate: f64,
    /// Number of grade records, i.e. graded assignments.
    pub total_assignments: usize,
    pub missed_days: usize,
    pub late_days: usize,
    pub total_attendance_records: usize,
}

impl StudentReport {
    pub fn letter(&self) -> LetterGrade {
        LetterGrade::from_score(self.average_grade)
    }
}

pub fn student_report(
    student: &Student,
    grades: &[Grade],
    attendance: &[Attendance],
) -> StudentReport {
    let own: Vec<&Attendance> = attendance
        .iter()
        .filter(|a| a.student_id == student.id)
        .collect();
    let count = |status: AttendanceStatus| own.iter().filter(|a| a.status == status).count();

    StudentReport {
        student: student.clone(),
        average_grade: average_grade(grades, student.id),
        attendance_rate: present_share(own.iter().copied()),
        total_assignments: grades.iter().filter(|g| g.student_id == student.id).count(),
        missed_days: count(AttendanceStatus::Absent),
        late_days: count(AttendanceStatus::Late),
        total_attendance_records: own.len(),
    }
}

/// One report per student, roster order.
pub fn student_reports(
    students: &[Student],
    grades: &[Grade],
    attendance: &[Attendance],
) -> Vec<StudentReport> {
    students
        .iter()
        .map(|s| student_report(s, grades, attendance))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOverview {
    pub total_students: usize,
    pub class_average: f64,
    pub attendance_rate: f64,
    pub total_assignments: usize,
}

pub fn class_overview(reports: &[StudentReport]) -> ClassOverview {
    ClassOverview {
        total_students: reports.len(),
        class_average: mean(reports.iter().map(|r| r.average_grade)),
        attendance_rate: mean(reports.iter().map(|r| r.attendance_rate)),
        total_assignments: reports.iter().map(|r| r.total_assignments).sum(),
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    /// Mean over every grade of an enrolled student.
    pub average_grade: f64,
    /// Present share over every attendance record of an enrolled student.
    pub attendance_rate: f64,
    /// Distinct assignments that have at least one grade.
    pub total_assignments: usize,
}

pub fn dashboard_stats(
    students: &[Student],
    grades: &[Grade],
    attendance: &[Attendance],
) -> DashboardStats {
    let roster: HashSet<Id> = students.iter().map(|s| s.id).collect();

    let live_grades: Vec<&Grade> = grades
        .iter()
        .filter(|g| roster.contains(&g.student_id))
        .collect();
    let live_attendance: Vec<&Attendance> = attendance
        .iter()
        .filter(|a| roster.contains(&a.student_id))
        .collect();

    let orphans =
        (grades.len() - live_grades.len()) + (attendance.len() - live_attendance.len());
    if orphans > 0 {
        tracing::warn!(orphans, "skipping records that reference missing students");
    }

    let assignments: HashSet<Id> = live_grades.iter().map(|g| g.assignment_id).collect();

    DashboardStats {
        total_students: students.len(),
        average_grade: mean(live_grades.iter().map(|g| g.score)),
        attendance_rate: present_share(live_attendance.into_iter()),
        total_assignments: assignments.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GradeLevel, StudentStatus};
    use chrono::Utc;

    fn grade(student_id: Id, assignment_id: Id, score: f64) -> Grade {
        Grade {
            id: 0,
            student_id,
            assignment_id,
            score,
            submitted_date: Utc::now(),
            comments: None,
        }
    }

    fn mark(student_id: Id, status: AttendanceStatus) -> Attendance {
        Attendance {
            id: 0,
            student_id,
            date: Utc::now(),
            status,
            notes: None,
        }
    }

    fn student(id: Id) -> Student {
        Student {
            id,
            first_name: format!("S{id}"),
            last_name: "Test".into(),
            grade: GradeLevel::Seventh,
            email: format!("s{id}@school.edu"),
            enrollment_date: Utc::now(),
            status: StudentStatus::Active,
        }
    }

    #[test]
    fn average_of_two_scores() {
        let grades = vec![grade(1, 1, 80.0), grade(1, 2, 90.0), grade(2, 1, 10.0)];
        assert_eq!(average_grade(&grades, 1), 85.0);
    }

    #[test]
    fn average_without_grades_is_zero() {
        let avg = average_grade(&[], 1);
        assert_eq!(avg, 0.0);
        assert!(!avg.is_nan());
    }

    #[test]
    fn attendance_rate_counts_only_present() {
        let records = vec![
            mark(1, AttendanceStatus::Present),
            mark(1, AttendanceStatus::Present),
            mark(1, AttendanceStatus::Absent),
            mark(1, AttendanceStatus::Late),
        ];
        assert_eq!(attendance_rate(&records, 1), 50.0);
    }

    #[test]
    fn attendance_rate_without_records_is_zero() {
        assert_eq!(attendance_rate(&[], 1), 0.0);
        let other = vec![mark(2, AttendanceStatus::Present)];
        assert_eq!(attendance_rate(&other, 1), 0.0);
    }

    #[test]
    fn class_average_is_mean_of_student_means() {
        let students = vec![student(1), student(2), student(3)];
        // 1 -> 85, 2 -> 70, 3 -> no grades -> 0
        let grades = vec![grade(1, 1, 80.0), grade(1, 2, 90.0), grade(2, 1, 70.0)];
        assert_eq!(class_average(&students, &grades), 155.0 / 3.0);
        assert_eq!(class_average(&[], &grades), 0.0);
    }

    #[test]
    fn percentage_guards_zero_points() {
        assert_eq!(percentage(45.0, 50.0), 90.0);
        assert_eq!(percentage(5.0, 0.0), 0.0);
    }

    #[test]
    fn letter_grade_boundaries() {
        assert_eq!(LetterGrade::from_score(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(89.9), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(0.0), LetterGrade::F);
    }

    #[test]
    fn student_report_tallies_attendance_kinds() {
        let s = student(1);
        let grades = vec![grade(1, 1, 60.0), grade(1, 2, 100.0)];
        let attendance = vec![
            mark(1, AttendanceStatus::Present),
            mark(1, AttendanceStatus::Absent),
            mark(1, AttendanceStatus::Absent),
            mark(1, AttendanceStatus::Late),
            mark(1, AttendanceStatus::Excused),
            mark(2, AttendanceStatus::Absent),
        ];
        let report = student_report(&s, &grades, &attendance);
        assert_eq!(report.average_grade, 80.0);
        assert_eq!(report.attendance_rate, 20.0);
        assert_eq!(report.total_assignments, 2);
        assert_eq!(report.missed_days, 2);
        assert_eq!(report.late_days, 1);
        assert_eq!(report.total_attendance_records, 5);
        assert_eq!(report.letter(), LetterGrade::B);
    }

    #[test]
    fn overview_of_no_reports_is_zeroed() {
        assert_eq!(class_overview(&[]), ClassOverview::default());
    }

    #[test]
    fn overview_averages_and_sums() {
        let students = vec![student(1), student(2)];
        let grades = vec![grade(1, 1, 90.0), grade(2, 1, 70.0), grade(2, 2, 70.0)];
        let attendance = vec![
            mark(1, AttendanceStatus::Present),
            mark(2, AttendanceStatus::Absent),
        ];
        let overview = class_overview(&student_reports(&students, &grades, &attendance));
        assert_eq!(overview.total_students, 2);
        assert_eq!(overview.class_average, 80.0);
        assert_eq!(overview.attendance_rate, 50.0);
        assert_eq!(overview.total_assignments, 3);
    }

    #[test]
    fn dashboard_skips_orphaned_records() {
        let students = vec![student(1)];
        let grades = vec![grade(1, 1, 80.0), grade(1, 1, 100.0), grade(9, 2, 0.0)];
        let attendance = vec![
            mark(1, AttendanceStatus::Present),
            mark(9, AttendanceStatus::Absent),
        ];
        let stats = dashboard_stats(&students, &grades, &attendance);
        assert_eq!(stats.total_students, 1);
        assert_eq!(stats.average_grade, 90.0);
        assert_eq!(stats.attendance_rate, 100.0);
        assert_eq!(stats.total_assignments, 1);
    }

    #[test]
    fn dashboard_of_empty_class_is_zeroed() {
        assert_eq!(dashboard_stats(&[], &[], &[]), DashboardStats::default());
    }
}
