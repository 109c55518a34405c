//! Command handlers. Each one calls a single API method, prints the rendered value
//! and then the command's messages.

use super::render::{self, print_messages};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use classbookapp::api::{ClassbookApi, StudentFilter};
use classbookapp::model::{
    AssignmentDraft, AssignmentPatch, AttendanceStatus, GradeLevel, StudentDraft, StudentPatch,
    StudentStatus,
};

// --- Students ---

pub async fn list_students(
    api: &ClassbookApi,
    search: Option<String>,
    grade: Option<GradeLevel>,
) -> Result<()> {
    let filter = StudentFilter { search, grade };
    let result = api.list_students(&filter).await?;
    print!("{}", render::render_students(&result.value));
    print_messages(&result.messages);
    Ok(())
}

pub async fn show_student(api: &ClassbookApi, id: &str) -> Result<()> {
    let result = api.get_student(id).await?;
    print!("{}", render::render_student(&result.value, Utc::now()));
    print_messages(&result.messages);
    Ok(())
}

pub async fn add_student(
    api: &ClassbookApi,
    first_name: String,
    last_name: String,
    grade: GradeLevel,
    email: String,
    enrolled: Option<DateTime<Utc>>,
    status: StudentStatus,
) -> Result<()> {
    let mut draft = StudentDraft::new(first_name, last_name, grade, email);
    draft.status = status;
    if let Some(enrolled) = enrolled {
        draft.enrollment_date = enrolled;
    }
    let result = api.add_student(draft).await?;
    print_messages(&result.messages);
    Ok(())
}

pub async fn edit_student(api: &ClassbookApi, id: &str, patch: StudentPatch) -> Result<()> {
    let result = api.update_student(id, &patch).await?;
    let row = api.get_student(&result.value.id.to_string()).await?;
    print!("{}", render::render_student(&row.value, Utc::now()));
    print_messages(&result.messages);
    Ok(())
}

pub async fn delete_student(api: &ClassbookApi, id: &str) -> Result<()> {
    let result = api.delete_student(id).await?;
    print_messages(&result.messages);
    Ok(())
}

// --- Assignments ---

pub async fn list_assignments(api: &ClassbookApi) -> Result<()> {
    let result = api.list_assignments().await?;
    print!("{}", render::render_assignments(&result.value, Utc::now()));
    print_messages(&result.messages);
    Ok(())
}

pub async fn add_assignment(api: &ClassbookApi, draft: AssignmentDraft) -> Result<()> {
    let result = api.add_assignment(draft).await?;
    print_messages(&result.messages);
    Ok(())
}

pub async fn edit_assignment(api: &ClassbookApi, id: &str, patch: AssignmentPatch) -> Result<()> {
    let result = api.update_assignment(id, &patch).await?;
    print!(
        "{}",
        render::render_assignments(std::slice::from_ref(&result.value), Utc::now())
    );
    print_messages(&result.messages);
    Ok(())
}

pub async fn delete_assignment(api: &ClassbookApi, id: &str) -> Result<()> {
    let result = api.delete_assignment(id).await?;
    print_messages(&result.messages);
    Ok(())
}

// --- Grades ---

pub async fn show_grades(api: &ClassbookApi, assignment: &str) -> Result<()> {
    let result = api.grade_matrix(assignment).await?;
    print!("{}", render::render_grade_matrix(&result.value));
    print_messages(&result.messages);
    Ok(())
}

pub async fn set_grade(
    api: &ClassbookApi,
    assignment: &str,
    student: &str,
    score: f64,
) -> Result<()> {
    let result = api.set_grade(assignment, student, score).await?;
    print!("{}", render::render_grade_cell(&result.value));
    print_messages(&result.messages);
    Ok(())
}

// --- Attendance ---

pub async fn attendance_week(api: &ClassbookApi, date: Option<NaiveDate>) -> Result<()> {
    let day = date.unwrap_or_else(|| Utc::now().date_naive());
    let result = api.attendance_week(day).await?;
    print!("{}", render::render_week(&result.value));
    print_messages(&result.messages);
    Ok(())
}

pub async fn mark_attendance(
    api: &ClassbookApi,
    student: &str,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<()> {
    let result = api.mark_attendance(student, date, status).await?;
    print_messages(&result.messages);
    Ok(())
}

// --- Views ---

pub async fn report(api: &ClassbookApi, csv: bool, header: bool) -> Result<()> {
    if csv {
        let result = api.report_csv(header).await?;
        print!("{}", result.value);
        // Keep stdout pure CSV.
        for message in &result.messages {
            tracing::info!("{}", message.content);
        }
        return Ok(());
    }
    let result = api.report().await?;
    print!("{}", render::render_report(&result.value));
    print_messages(&result.messages);
    Ok(())
}

pub async fn dashboard(api: &ClassbookApi) -> Result<()> {
    let result = api.dashboard().await?;
    print!("{}", render::render_dashboard(&result.value, Utc::now()));
    print_messages(&result.messages);
    Ok(())
}

pub async fn calendar(api: &ClassbookApi, year: i32, month: u32) -> Result<()> {
    let result = api.calendar(year, month).await?;
    print!("{}", render::render_calendar(&result.value));
    print_messages(&result.messages);
    Ok(())
}
