use super::{fetched, CmdMessage, CmdResult};
use crate::aggregate::{
    attendance_on, dashboard_stats, overdue_assignments, recent_activity, upcoming_assignments,
    Activity, DashboardStats, UPCOMING_LIMIT, UPCOMING_WINDOW_DAYS,
};
use crate::error::Result;
use crate::model::{Assignment, Attendance};
use crate::store::Classroom;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How far ahead, and how many, upcoming assignments to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingWindow {
    pub days: i64,
    pub limit: usize,
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self {
            days: UPCOMING_WINDOW_DAYS,
            limit: UPCOMING_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub upcoming: Vec<Assignment>,
    pub overdue: Vec<Assignment>,
    pub today_attendance: Vec<Attendance>,
    pub activity: Vec<Activity>,
}

/// Everything on the dashboard, from one concurrent fetch of all four collections.
pub async fn load(
    room: &Classroom,
    now: DateTime<Utc>,
    window: UpcomingWindow,
) -> Result<CmdResult<Dashboard>> {
    let (students, assignments, grades, attendance) = tokio::try_join!(
        fetched(room.students.get_all()),
        fetched(room.assignments.get_all()),
        fetched(room.grades.get_all()),
        fetched(room.attendance.get_all()),
    )?;

    let dashboard = Dashboard {
        stats: dashboard_stats(&students, &grades, &attendance),
        upcoming: upcoming_assignments(&assignments, now, window.days, window.limit),
        overdue: overdue_assignments(&assignments, now),
        today_attendance: attendance_on(&attendance, now.date_naive()),
        activity: recent_activity(&students, &assignments),
    };

    let mut result = CmdResult::new(dashboard);
    if result.value.today_attendance.is_empty() {
        result.add_message(CmdMessage::info("Attendance has not been taken today"));
    }
    if !result.value.overdue.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} assignment(s) past due",
            result.value.overdue.len()
        )));
    }
    Ok(result)
}
