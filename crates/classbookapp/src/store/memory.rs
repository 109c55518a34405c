use super::classroom::Classroom;
use super::seed::Seed;

impl Classroom {
    /// An empty classroom that resolves every call immediately.
    pub fn in_memory() -> Self {
        Classroom::instant(Seed::default())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{
        Assignment, Attendance, AttendanceStatus, Category, Grade, GradeLevel, Id, Record,
        Student, StudentDraft, StudentStatus,
    };
    use chrono::{DateTime, TimeZone, Utc};

    pub fn student_draft(first: &str, last: &str) -> StudentDraft {
        StudentDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            grade: GradeLevel::Fifth,
            email: format!(
                "{}.{}@school.edu",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            enrollment_date: Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(),
            status: StudentStatus::Active,
        }
    }

    fn next<R: Record>(records: &[R]) -> Id {
        records.iter().map(Record::id).max().map_or(1, |m| m + 1)
    }

    /// Builds a seed record by record, then hands out a zero-latency [`Classroom`].
    #[derive(Default)]
    pub struct StoreFixture {
        pub seed: Seed,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_students(mut self, count: usize) -> Self {
            for i in 0..count {
                let id = next(&self.seed.students);
                let draft = student_draft(&format!("Student{}", i + 1), "Test");
                self.seed.students.push(Student::from_draft(id, draft));
            }
            self
        }

        pub fn with_student(mut self, first: &str, last: &str, grade: GradeLevel) -> Self {
            let id = next(&self.seed.students);
            let mut draft = student_draft(first, last);
            draft.grade = grade;
            self.seed.students.push(Student::from_draft(id, draft));
            self
        }

        pub fn with_assignment(
            mut self,
            title: &str,
            category: Category,
            due_date: DateTime<Utc>,
        ) -> Self {
            self.seed.assignments.push(Assignment {
                id: next(&self.seed.assignments),
                title: title.to_string(),
                category,
                total_points: 100.0,
                due_date,
                description: None,
            });
            self
        }

        pub fn with_grade(mut self, student_id: Id, assignment_id: Id, score: f64) -> Self {
            self.seed.grades.push(Grade {
                id: next(&self.seed.grades),
                student_id,
                assignment_id,
                score,
                submitted_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
                comments: None,
            });
            self
        }

        pub fn with_attendance(
            mut self,
            student_id: Id,
            date: DateTime<Utc>,
            status: AttendanceStatus,
        ) -> Self {
            self.seed.attendance.push(Attendance {
                id: next(&self.seed.attendance),
                student_id,
                date,
                status,
                notes: None,
            });
            self
        }

        pub fn build(self) -> Classroom {
            Classroom::instant(self.seed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::model::{AttendanceStatus, Category, GradeLevel};
    use chrono::Utc;

    #[tokio::test]
    async fn in_memory_classroom_starts_empty() {
        let room = Classroom::in_memory();
        assert!(room.students.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn fixtures_assign_sequential_ids() {
        let room = StoreFixture::new()
            .with_students(2)
            .with_student("Grace", "Hopper", GradeLevel::Twelfth)
            .with_assignment("Quiz 1", Category::Quiz, Utc::now())
            .with_grade(3, 1, 77.0)
            .with_attendance(3, Utc::now(), AttendanceStatus::Late)
            .build();

        let students = room.students.get_all().await;
        assert_eq!(students.len(), 3);
        assert_eq!(students[2].id, 3);
        assert_eq!(students[2].grade, GradeLevel::Twelfth);
        assert_eq!(students[2].email, "grace.hopper@school.edu");

        assert_eq!(room.grades.get_by_student_id(3).await[0].score, 77.0);
        assert_eq!(room.attendance.get_by_student_id(3).await.len(), 1);
    }
}
