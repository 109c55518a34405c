use super::{CmdMessage, CmdResult};
use crate::aggregate::{month_calendar, MonthCalendar};
use crate::error::{ClassbookError, FieldError, Result};
use crate::store::Classroom;

/// Assignment due dates laid out on one month.
pub async fn month(room: &Classroom, year: i32, month: u32) -> Result<CmdResult<MonthCalendar>> {
    let assignments = room.assignments.get_all().await;
    let calendar = month_calendar(&assignments, year, month).ok_or_else(|| {
        ClassbookError::Validation(vec![FieldError::new(
            "month",
            format!("Month must be between 1 and 12, got {month}"),
        )])
    })?;

    let due: usize = calendar.days.iter().map(|d| d.markers.len()).sum();
    let mut result = CmdResult::new(calendar);
    if due == 0 {
        result.add_message(CmdMessage::info("Nothing due this month"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn buckets_assignments_of_the_month() {
        let room = StoreFixture::new()
            .with_assignment("Essay", Category::Homework, Utc.with_ymd_and_hms(2024, 3, 5, 23, 0, 0).unwrap())
            .with_assignment("Quiz", Category::Quiz, Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap())
            .with_assignment("Final", Category::Test, Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap())
            .build();

        let cal = month(&room, 2024, 3).await.unwrap();
        assert!(cal.messages.is_empty());
        assert_eq!(cal.value.day(5).unwrap().markers.len(), 2);

        let empty = month(&room, 2024, 5).await.unwrap();
        assert_eq!(empty.messages.len(), 1);
    }

    #[tokio::test]
    async fn month_out_of_range_is_a_validation_error() {
        let room = Classroom::in_memory();
        let err = month(&room, 2024, 13).await.unwrap_err();
        assert!(matches!(err, ClassbookError::Validation(_)));
    }
}
