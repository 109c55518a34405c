//! The grade matrix: one assignment, every student on the roster, and the score
//! each of them has for it.

use super::{fetched, join_writes, CmdMessage, CmdResult};
use crate::aggregate::{percentage, LetterGrade};
use crate::error::Result;
use crate::model::{Assignment, Grade, GradeDraft, GradePatch, Id, Student};
use crate::store::Classroom;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCell {
    pub student: Student,
    pub grade: Option<Grade>,
    /// Score as a share of the assignment's points.
    pub percentage: Option<f64>,
    pub letter: Option<LetterGrade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeMatrix {
    pub assignment: Assignment,
    pub rows: Vec<GradeCell>,
    pub graded: usize,
    /// Mean percentage over graded rows, 0 when nothing is graded.
    pub average_percentage: f64,
}

/// One edited row of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntry {
    pub student_id: Id,
    pub score: f64,
    /// `None` keeps the current comment, `Some(None)` clears it.
    pub comments: Option<Option<String>>,
}

/// Grades keyed by student. With duplicates the later record wins.
fn by_student(grades: Vec<Grade>) -> HashMap<Id, Grade> {
    grades.into_iter().map(|g| (g.student_id, g)).collect()
}

fn cell(student: Student, grade: Option<Grade>, total_points: f64) -> GradeCell {
    let percentage = grade.as_ref().map(|g| percentage(g.score, total_points));
    GradeCell {
        student,
        letter: percentage.map(LetterGrade::from_score),
        percentage,
        grade,
    }
}

fn matrix(assignment: Assignment, students: Vec<Student>, grades: Vec<Grade>) -> GradeMatrix {
    let mut existing = by_student(grades);
    let rows: Vec<GradeCell> = students
        .into_iter()
        .map(|s| {
            let grade = existing.remove(&s.id);
            cell(s, grade, assignment.total_points)
        })
        .collect();

    let scored: Vec<f64> = rows.iter().filter_map(|r| r.percentage).collect();
    let average_percentage = if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    };

    GradeMatrix {
        graded: scored.len(),
        average_percentage,
        assignment,
        rows,
    }
}

/// Load the roster, the assignment and its grades at once.
pub async fn load(room: &Classroom, assignment_id: Id) -> Result<CmdResult<GradeMatrix>> {
    let (students, assignment, grades) = tokio::try_join!(
        fetched(room.students.get_all()),
        room.assignments.get_by_id(assignment_id),
        fetched(room.grades.get_by_assignment_id(assignment_id)),
    )?;

    let mut result = CmdResult::new(matrix(assignment, students, grades));
    if result.value.rows.is_empty() {
        result.add_message(CmdMessage::info("No students on the roster"));
    }
    Ok(result)
}

/// Keep the last entry per student, in order of first appearance.
fn dedupe(entries: Vec<GradeEntry>) -> Vec<GradeEntry> {
    let mut unique: Vec<GradeEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match unique.iter_mut().find(|e| e.student_id == entry.student_id) {
            Some(slot) => *slot = entry,
            None => unique.push(entry),
        }
    }
    unique
}

async fn upsert(
    room: &Classroom,
    assignment_id: Id,
    existing: &HashMap<Id, Grade>,
    entries: Vec<GradeEntry>,
    now: DateTime<Utc>,
) -> Result<Vec<Grade>> {
    let writes: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            let current = existing.get(&entry.student_id).map(|g| g.id);
            async move {
                match current {
                    Some(id) => {
                        let patch = GradePatch {
                            score: Some(entry.score),
                            submitted_date: Some(now),
                            comments: entry.comments,
                            ..Default::default()
                        };
                        room.grades.update(id, &patch).await
                    }
                    None => {
                        let draft = GradeDraft {
                            student_id: entry.student_id,
                            assignment_id,
                            score: entry.score,
                            submitted_date: now,
                            comments: entry.comments.flatten(),
                        };
                        Ok(room.grades.create(draft).await)
                    }
                }
            }
        })
        .collect();
    join_writes(writes).await
}

/// Save a batch of matrix edits for one assignment.
///
/// A student who already has a grade for the assignment gets it updated; anyone
/// else gets a new grade. All writes run concurrently. On partial failure the
/// error is [`Batch`](crate::error::ClassbookError::Batch) and the successful
/// writes stay.
pub async fn save_grades(
    room: &Classroom,
    assignment_id: Id,
    entries: Vec<GradeEntry>,
    now: DateTime<Utc>,
) -> Result<CmdResult<Vec<Grade>>> {
    let (_, existing) = tokio::try_join!(
        room.assignments.get_by_id(assignment_id),
        fetched(room.grades.get_by_assignment_id(assignment_id)),
    )?;

    let saved = upsert(room, assignment_id, &by_student(existing), dedupe(entries), now).await?;
    let message = format!("Saved {} grade(s)", saved.len());
    Ok(CmdResult::new(saved).with_message(CmdMessage::success(message)))
}

/// Record one student's score, checking that both student and assignment exist.
pub async fn set_grade(
    room: &Classroom,
    assignment_id: Id,
    student_id: Id,
    score: f64,
    now: DateTime<Utc>,
) -> Result<CmdResult<GradeCell>> {
    let (student, assignment, existing) = tokio::try_join!(
        room.students.get_by_id(student_id),
        room.assignments.get_by_id(assignment_id),
        fetched(room.grades.get_by_assignment_id(assignment_id)),
    )?;

    let entry = GradeEntry {
        student_id,
        score,
        comments: None,
    };
    let mut saved = upsert(room, assignment_id, &by_student(existing), vec![entry], now).await?;
    let grade = saved.pop();

    let mut result = CmdResult::new(cell(student, grade, assignment.total_points));
    if score < 0.0 || score > assignment.total_points {
        result.add_message(CmdMessage::warning(format!(
            "Score {score} is outside 0..{} points",
            assignment.total_points
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Graded {} on {}",
        result.value.student.full_name(),
        assignment.title
    )));
    Ok(result)
}
