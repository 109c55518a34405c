use super::{validate, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Assignment, AssignmentDraft, AssignmentPatch, Id};
use crate::store::Classroom;

/// Every assignment in creation order.
pub async fn list(room: &Classroom) -> Result<CmdResult<Vec<Assignment>>> {
    let assignments = room.assignments.get_all().await;
    let mut result = CmdResult::new(assignments);
    if result.value.is_empty() {
        result.add_message(CmdMessage::info("No assignments yet"));
    }
    Ok(result)
}

pub async fn get(room: &Classroom, id: Id) -> Result<CmdResult<Assignment>> {
    Ok(CmdResult::new(room.assignments.get_by_id(id).await?))
}

pub async fn create(room: &Classroom, draft: AssignmentDraft) -> Result<CmdResult<Assignment>> {
    validate::assignment_draft(&draft)?;
    let assignment = room.assignments.create(draft).await;
    let message = format!("Assignment created ({}): {}", assignment.id, assignment.title);
    Ok(CmdResult::new(assignment).with_message(CmdMessage::success(message)))
}

pub async fn update(
    room: &Classroom,
    id: Id,
    patch: &AssignmentPatch,
) -> Result<CmdResult<Assignment>> {
    validate::assignment_patch(patch)?;
    let assignment = room.assignments.update(id, patch).await?;
    let message = format!("Assignment updated ({}): {}", assignment.id, assignment.title);
    Ok(CmdResult::new(assignment).with_message(CmdMessage::success(message)))
}

/// Removes the assignment. Grades recorded against it are kept.
pub async fn delete(room: &Classroom, id: Id) -> Result<CmdResult<Assignment>> {
    let assignment = room.assignments.get_by_id(id).await?;
    room.assignments.delete(id).await?;
    let mut result = CmdResult::new(assignment);
    result.add_message(CmdMessage::success(format!(
        "Assignment deleted ({}): {}",
        result.value.id, result.value.title
    )));

    let leftover = room.grades.get_by_assignment_id(id).await.len();
    if leftover > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{leftover} grade(s) still reference the deleted assignment"
        )));
    }
    Ok(result)
}
