use crate::model::{Assignment, Attendance, Id, Student};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

pub const UPCOMING_WINDOW_DAYS: i64 = 7;
pub const UPCOMING_LIMIT: usize = 5;

/// Assignments due in `[now, now + window_days]`, soonest first, at most `limit`.
/// A window too large for the calendar has no upper end.
pub fn upcoming_assignments(
    assignments: &[Assignment],
    now: DateTime<Utc>,
    window_days: i64,
    limit: usize,
) -> Vec<Assignment> {
    let horizon = Duration::try_days(window_days).and_then(|d| now.checked_add_signed(d));
    let mut upcoming: Vec<Assignment> = assignments
        .iter()
        .filter(|a| a.due_date >= now && horizon.map_or(true, |h| a.due_date <= h))
        .cloned()
        .collect();
    // stable: equal due dates keep input order
    upcoming.sort_by_key(|a| a.due_date);
    upcoming.truncate(limit);
    upcoming
}

/// Assignments already past due, most recently due first.
pub fn overdue_assignments(assignments: &[Assignment], now: DateTime<Utc>) -> Vec<Assignment> {
    let mut overdue: Vec<Assignment> = assignments
        .iter()
        .filter(|a| a.due_date < now)
        .cloned()
        .collect();
    overdue.sort_by(|a, b| b.due_date.cmp(&a.due_date));
    overdue
}

/// Records taken on `day` (UTC calendar date).
pub fn attendance_on(records: &[Attendance], day: NaiveDate) -> Vec<Attendance> {
    records
        .iter()
        .filter(|a| a.date.date_naive() == day)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Student,
    Assignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub id: Id,
    pub title: String,
}

/// Dashboard feed: the first three students and the first two assignments.
pub fn recent_activity(students: &[Student], assignments: &[Assignment]) -> Vec<Activity> {
    let enrolled = students.iter().take(3).map(|s| Activity {
        kind: ActivityKind::Student,
        id: s.id,
        title: format!("{} enrolled", s.full_name()),
    });
    let created = assignments.iter().take(2).map(|a| Activity {
        kind: ActivityKind::Assignment,
        id: a.id,
        title: format!("{} created", a.title),
    });
    enrolled.chain(created).collect()
}
