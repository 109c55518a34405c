//! # Aggregation Engine
//!
//! Pure functions that join already-fetched record snapshots by foreign key and
//! reduce them to the numbers the UI shows: averages, attendance rates, upcoming
//! work, calendar buckets, CSV rows.
//!
//! ## Rules
//!
//! - **No store access.** Inputs are slices; callers fetch first. If a fetch failed,
//!   the caller never gets here.
//! - **Never fails.** Empty input yields zero or empty output, never `NaN` and never
//!   an error. "0% attendance" for a brand-new student is a real answer.
//! - **Dangling keys are skipped.** A grade or attendance record whose student no
//!   longer exists is left out of anything keyed by the roster.
//! - **Deterministic.** Functions that depend on "now" take it as an argument.

pub mod calendar;
pub mod export;
pub mod roster;
pub mod schedule;
pub mod stats;

pub use calendar::{month_calendar, week_of, CalendarDay, DueMarker, MonthCalendar};
pub use export::reports_to_csv;
pub use roster::filter_students;
pub use schedule::{
    attendance_on, overdue_assignments, recent_activity, upcoming_assignments, Activity,
    ActivityKind, UPCOMING_LIMIT, UPCOMING_WINDOW_DAYS,
};
pub use stats::{
    attendance_rate, average_grade, class_average, class_overview, dashboard_stats, percentage,
    student_report, student_reports, ClassOverview, DashboardStats, LetterGrade, StudentReport,
};
