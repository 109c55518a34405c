//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every classroom operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! - **Owns** the [`Classroom`] and the [`ClassbookConfig`] it was built from
//! - **Normalizes inputs**: identifiers arrive as raw user text and are coerced
//!   with [`parse_id`]
//! - **Dispatches** to the matching function in [`commands`]
//!
//! ## Raw Identifiers
//!
//! Text that does not coerce to an Id (`"abc"`, `"0"`, `"-3"`) is not rejected
//! up front: it simply matches no record, so the caller gets the same
//! [`NotFound`](ClassbookError::NotFound) it would get for an Id that was never
//! assigned. The error keeps the text exactly as typed.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout or stderr
//! - **Clock reads in commands**: "now" is read here, once per call, and passed in

use crate::aggregate::MonthCalendar;
use crate::commands::{
    self, assignments, attendance, calendar, dashboard, grades, reports, students, CmdResult,
};
use crate::config::ClassbookConfig;
use crate::error::{ClassbookError, Result};
use crate::model::{
    Assignment, AssignmentDraft, AssignmentPatch, Attendance, AttendanceStatus, EntityKind,
    Grade, Id, Student, StudentDraft, StudentPatch,
};
use crate::store::{parse_id, Classroom};
use chrono::{NaiveDate, Utc};

pub use commands::attendance::{AttendanceMark, AttendanceWeek};
pub use commands::dashboard::{Dashboard, UpcomingWindow};
pub use commands::grades::{GradeCell, GradeEntry, GradeMatrix};
pub use commands::reports::ClassReport;
pub use commands::students::{StudentFilter, StudentRow};

fn resolve(entity: EntityKind, raw: &str) -> Result<Id> {
    parse_id(raw).ok_or_else(|| ClassbookError::not_found(entity, raw))
}

/// Rewrap a NotFound raised for a coerced Id so it reports the text the user typed.
fn as_typed<T>(result: Result<T>, entity: EntityKind, raw: &str) -> Result<T> {
    result.map_err(|e| match e {
        ClassbookError::NotFound { entity: found, .. } if found == entity => {
            ClassbookError::not_found(entity, raw)
        }
        other => other,
    })
}

/// The main API facade for classroom operations.
pub struct ClassbookApi {
    room: Classroom,
    config: ClassbookConfig,
}

impl ClassbookApi {
    pub fn new(room: Classroom, config: ClassbookConfig) -> Self {
        Self { room, config }
    }

    /// Build the classroom the configuration describes.
    pub fn from_config(config: ClassbookConfig) -> Result<Self> {
        Ok(Self::new(config.classroom()?, config))
    }

    pub fn classroom(&self) -> &Classroom {
        &self.room
    }

    pub fn config(&self) -> &ClassbookConfig {
        &self.config
    }

    // --- Students ---

    pub async fn list_students(&self, filter: &StudentFilter) -> Result<CmdResult<Vec<StudentRow>>> {
        students::list(&self.room, filter).await
    }

    pub async fn get_student(&self, id: &str) -> Result<CmdResult<StudentRow>> {
        let sid = resolve(EntityKind::Student, id)?;
        as_typed(students::get(&self.room, sid).await, EntityKind::Student, id)
    }

    pub async fn add_student(&self, draft: StudentDraft) -> Result<CmdResult<Student>> {
        students::create(&self.room, draft).await
    }

    pub async fn update_student(
        &self,
        id: &str,
        patch: &StudentPatch,
    ) -> Result<CmdResult<Student>> {
        let sid = resolve(EntityKind::Student, id)?;
        as_typed(students::update(&self.room, sid, patch).await, EntityKind::Student, id)
    }

    pub async fn delete_student(&self, id: &str) -> Result<CmdResult<Student>> {
        let sid = resolve(EntityKind::Student, id)?;
        as_typed(students::delete(&self.room, sid).await, EntityKind::Student, id)
    }

    // --- Assignments ---

    pub async fn list_assignments(&self) -> Result<CmdResult<Vec<Assignment>>> {
        assignments::list(&self.room).await
    }

    pub async fn get_assignment(&self, id: &str) -> Result<CmdResult<Assignment>> {
        let aid = resolve(EntityKind::Assignment, id)?;
        as_typed(assignments::get(&self.room, aid).await, EntityKind::Assignment, id)
    }

    pub async fn add_assignment(&self, draft: AssignmentDraft) -> Result<CmdResult<Assignment>> {
        assignments::create(&self.room, draft).await
    }

    pub async fn update_assignment(
        &self,
        id: &str,
        patch: &AssignmentPatch,
    ) -> Result<CmdResult<Assignment>> {
        let aid = resolve(EntityKind::Assignment, id)?;
        as_typed(
            assignments::update(&self.room, aid, patch).await,
            EntityKind::Assignment,
            id,
        )
    }

    pub async fn delete_assignment(&self, id: &str) -> Result<CmdResult<Assignment>> {
        let aid = resolve(EntityKind::Assignment, id)?;
        as_typed(assignments::delete(&self.room, aid).await, EntityKind::Assignment, id)
    }

    // --- Grades ---

    pub async fn grade_matrix(&self, assignment: &str) -> Result<CmdResult<GradeMatrix>> {
        let aid = resolve(EntityKind::Assignment, assignment)?;
        as_typed(grades::load(&self.room, aid).await, EntityKind::Assignment, assignment)
    }

    pub async fn save_grades(
        &self,
        assignment: &str,
        entries: Vec<GradeEntry>,
    ) -> Result<CmdResult<Vec<Grade>>> {
        let aid = resolve(EntityKind::Assignment, assignment)?;
        as_typed(
            grades::save_grades(&self.room, aid, entries, Utc::now()).await,
            EntityKind::Assignment,
            assignment,
        )
    }

    pub async fn set_grade(
        &self,
        assignment: &str,
        student: &str,
        score: f64,
    ) -> Result<CmdResult<GradeCell>> {
        let aid = resolve(EntityKind::Assignment, assignment)?;
        let sid = resolve(EntityKind::Student, student)?;
        let result = grades::set_grade(&self.room, aid, sid, score, Utc::now()).await;
        as_typed(
            as_typed(result, EntityKind::Assignment, assignment),
            EntityKind::Student,
            student,
        )
    }

    // --- Attendance ---

    pub async fn attendance_week(&self, day: NaiveDate) -> Result<CmdResult<AttendanceWeek>> {
        attendance::load_week(&self.room, day).await
    }

    pub async fn save_attendance(
        &self,
        marks: Vec<AttendanceMark>,
    ) -> Result<CmdResult<Vec<Attendance>>> {
        attendance::save_attendance(&self.room, marks).await
    }

    pub async fn mark_attendance(
        &self,
        student: &str,
        day: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<CmdResult<Attendance>> {
        let sid = resolve(EntityKind::Student, student)?;
        as_typed(
            attendance::mark(&self.room, sid, day, status).await,
            EntityKind::Student,
            student,
        )
    }

    // --- Views ---

    pub async fn report(&self) -> Result<CmdResult<ClassReport>> {
        reports::class_report(&self.room).await
    }

    pub async fn report_csv(&self, header: bool) -> Result<CmdResult<String>> {
        reports::export_csv(&self.room, header).await
    }

    pub async fn dashboard(&self) -> Result<CmdResult<Dashboard>> {
        dashboard::load(&self.room, Utc::now(), self.config.upcoming_window()).await
    }

    pub async fn calendar(
        &self,
        year: i32,
        month: u32,
    ) -> Result<CmdResult<MonthCalendar>> {
        calendar::month(&self.room, year, month).await
    }
}
