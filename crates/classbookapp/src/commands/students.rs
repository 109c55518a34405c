use super::{validate, CmdMessage, CmdResult};
use crate::aggregate::{attendance_rate, average_grade, filter_students};
use crate::error::Result;
use crate::model::{GradeLevel, Id, Student, StudentDraft, StudentPatch};
use crate::store::Classroom;
use futures::future::join_all;
use serde::Serialize;

/// A roster line with the student's running numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub student: Student,
    pub average_grade: f64,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub grade: Option<GradeLevel>,
}

async fn row(room: &Classroom, student: Student) -> StudentRow {
    let (grades, attendance) = tokio::join!(
        room.grades.get_by_student_id(student.id),
        room.attendance.get_by_student_id(student.id)
    );
    StudentRow {
        average_grade: average_grade(&grades, student.id),
        attendance_rate: attendance_rate(&attendance, student.id),
        student,
    }
}

/// The roster, filtered, each student with their average and attendance rate.
///
/// The per-student lookups run concurrently; rows keep roster order.
pub async fn list(room: &Classroom, filter: &StudentFilter) -> Result<CmdResult<Vec<StudentRow>>> {
    let students = room.students.get_all().await;
    let matched = filter_students(&students, filter.search.as_deref(), filter.grade);
    let rows = join_all(matched.into_iter().map(|s| row(room, s))).await;

    let mut result = CmdResult::new(rows);
    if result.value.is_empty() {
        let message = if students.is_empty() {
            "No students yet"
        } else {
            "No students match the filter"
        };
        result.add_message(CmdMessage::info(message));
    }
    Ok(result)
}

pub async fn get(room: &Classroom, id: Id) -> Result<CmdResult<StudentRow>> {
    let student = room.students.get_by_id(id).await?;
    Ok(CmdResult::new(row(room, student).await))
}

pub async fn create(room: &Classroom, draft: StudentDraft) -> Result<CmdResult<Student>> {
    validate::student_draft(&draft)?;
    let student = room.students.create(draft).await;
    let message = format!("Student added ({}): {}", student.id, student.full_name());
    Ok(CmdResult::new(student).with_message(CmdMessage::success(message)))
}

pub async fn update(room: &Classroom, id: Id, patch: &StudentPatch) -> Result<CmdResult<Student>> {
    validate::student_patch(patch)?;
    let student = room.students.update(id, patch).await?;
    let message = format!("Student updated ({}): {}", student.id, student.full_name());
    Ok(CmdResult::new(student).with_message(CmdMessage::success(message)))
}

/// Removes the student only. Their grades and attendance stay behind as orphans.
pub async fn delete(room: &Classroom, id: Id) -> Result<CmdResult<Student>> {
    let student = room.students.get_by_id(id).await?;
    room.students.delete(id).await?;
    let message = format!("Student removed ({}): {}", student.id, student.full_name());
    Ok(CmdResult::new(student).with_message(CmdMessage::success(message)))
}
