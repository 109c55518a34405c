//! The weekly attendance grid: every student on the roster against the seven days
//! (Sunday to Saturday) of one week.
//!
//! Records are matched to grid cells by UTC calendar day. New records are stored
//! at midnight UTC of their day.

use super::{fetched, join_writes, CmdMessage, CmdResult};
use crate::aggregate::week_of;
use crate::error::{ClassbookError, Result};
use crate::model::{
    Attendance, AttendanceDraft, AttendancePatch, AttendanceStatus, EntityKind, Id, Student,
};
use crate::store::Classroom;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRow {
    pub student: Student,
    /// One cell per day of the week, Sunday first.
    pub marks: [Option<Attendance>; 7],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWeek {
    pub days: [NaiveDate; 7],
    pub rows: Vec<AttendanceRow>,
    pub total_records: usize,
    pub present_count: usize,
    /// Present share of the filled cells, 0 for an empty week.
    pub attendance_rate: f64,
}

/// One edited cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceMark {
    pub student_id: Id,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Midnight UTC of `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

type CellKey = (Id, NaiveDate);

/// Records keyed by student and day. With duplicates the later record wins.
fn by_cell(records: Vec<Attendance>) -> HashMap<CellKey, Attendance> {
    records
        .into_iter()
        .map(|a| ((a.student_id, a.date.date_naive()), a))
        .collect()
}

fn grid(days: [NaiveDate; 7], students: Vec<Student>, records: Vec<Attendance>) -> AttendanceWeek {
    let mut cells = by_cell(records);
    let rows: Vec<AttendanceRow> = students
        .into_iter()
        .map(|student| {
            let marks = days.map(|day| cells.remove(&(student.id, day)));
            AttendanceRow { student, marks }
        })
        .collect();

    let filled = rows.iter().flat_map(|r| r.marks.iter().flatten());
    let (present_count, total_records) = filled.fold((0, 0), |(p, t), a| {
        (p + usize::from(a.status == AttendanceStatus::Present), t + 1)
    });
    let attendance_rate = if total_records == 0 {
        0.0
    } else {
        present_count as f64 / total_records as f64 * 100.0
    };

    AttendanceWeek {
        days,
        rows,
        total_records,
        present_count,
        attendance_rate,
    }
}

/// Load the roster and the records of the week containing `day`, at once.
pub async fn load_week(room: &Classroom, day: NaiveDate) -> Result<CmdResult<AttendanceWeek>> {
    let days = week_of(day);
    let (students, records) = tokio::try_join!(
        fetched(room.students.get_all()),
        fetched(room.attendance.get_by_days(days[0], days[6])),
    )?;

    let mut result = CmdResult::new(grid(days, students, records));
    if result.value.total_records == 0 {
        result.add_message(CmdMessage::info(format!(
            "No attendance taken for the week of {}",
            days[0]
        )));
    }
    Ok(result)
}

/// Keep the last mark per (student, day), in order of first appearance.
fn dedupe(marks: Vec<AttendanceMark>) -> Vec<AttendanceMark> {
    let mut unique: Vec<AttendanceMark> = Vec::with_capacity(marks.len());
    for mark in marks {
        match unique
            .iter_mut()
            .find(|m| m.student_id == mark.student_id && m.date == mark.date)
        {
            Some(slot) => *slot = mark,
            None => unique.push(mark),
        }
    }
    unique
}

/// Save a batch of grid edits.
///
/// A cell that already has a record gets it updated; an empty cell gets a new
/// record. All writes run concurrently. On partial failure the error is
/// [`Batch`](crate::error::ClassbookError::Batch) and the successful writes stay.
pub async fn save_attendance(
    room: &Classroom,
    marks: Vec<AttendanceMark>,
) -> Result<CmdResult<Vec<Attendance>>> {
    let marks = dedupe(marks);
    let (Some(first), Some(last)) = (
        marks.iter().map(|m| m.date).min(),
        marks.iter().map(|m| m.date).max(),
    ) else {
        return Ok(CmdResult::new(Vec::new()).with_message(CmdMessage::info("Nothing to save")));
    };

    let existing = by_cell(room.attendance.get_by_days(first, last).await);

    let writes: Vec<_> = marks
        .into_iter()
        .map(|mark| {
            let current = existing.get(&(mark.student_id, mark.date)).map(|a| a.id);
            async move {
                match current {
                    Some(id) => {
                        let patch = AttendancePatch {
                            status: Some(mark.status),
                            notes: Some(mark.notes),
                            ..Default::default()
                        };
                        room.attendance.update(id, &patch).await
                    }
                    None => {
                        let draft = AttendanceDraft {
                            student_id: mark.student_id,
                            date: start_of_day(mark.date),
                            status: mark.status,
                            notes: mark.notes,
                        };
                        Ok(room.attendance.create(draft).await)
                    }
                }
            }
        })
        .collect();

    let saved = join_writes(writes).await?;
    let message = format!("Saved {} attendance record(s)", saved.len());
    Ok(CmdResult::new(saved).with_message(CmdMessage::success(message)))
}

/// Mark one student on one day, checking that the student exists.
pub async fn mark(
    room: &Classroom,
    student_id: Id,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<CmdResult<Attendance>> {
    let student = room.students.get_by_id(student_id).await?;
    let mark = AttendanceMark {
        student_id,
        date,
        status,
        notes: None,
    };
    let mut saved = save_attendance(room, vec![mark]).await?.into_value();
    let record = saved
        .pop()
        .ok_or_else(|| ClassbookError::not_found(EntityKind::Attendance, student_id))?;

    let message = format!("{} marked {} on {}", student.full_name(), status, date);
    Ok(CmdResult::new(record).with_message(CmdMessage::success(message)))
}
