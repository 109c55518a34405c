//! Month and week layouts for the assignment calendar and the attendance grid.

use crate::model::{Assignment, Category, Id};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1-12) of `year`. `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// A due-date marker drawn on a calendar day, colored by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueMarker {
    pub assignment_id: Id,
    pub title: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub markers: Vec<DueMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first grid (Sunday = 0).
    pub leading_blanks: u32,
    pub days_in_month: u32,
    /// One entry per day, `days[0]` is the 1st.
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        day.checked_sub(1).and_then(|i| self.days.get(i as usize))
    }

    /// Number of week rows needed to draw the month.
    pub fn weeks(&self) -> u32 {
        (self.leading_blanks + self.days_in_month).div_ceil(7)
    }
}

/// Bucket assignments by the calendar day (UTC) of their due date within one month.
/// Markers on a day keep input order. `None` when `month` is not 1-12.
pub fn month_calendar(assignments: &[Assignment], year: i32, month: u32) -> Option<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_in_month = days_in_month(year, month)?;

    let mut days: Vec<CalendarDay> = (1..=days_in_month)
        .map(|day| CalendarDay {
            day,
            markers: Vec::new(),
        })
        .collect();

    for assignment in assignments {
        let due = assignment.due_date.date_naive();
        if due.year() != year || due.month() != month {
            continue;
        }
        if let Some(slot) = days.get_mut(due.day0() as usize) {
            slot.markers.push(DueMarker {
                assignment_id: assignment.id,
                title: assignment.title.clone(),
                category: assignment.category,
            });
        }
    }

    Some(MonthCalendar {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days_in_month,
        days,
    })
}

/// The Sunday-to-Saturday week containing `day`.
pub fn week_of(day: NaiveDate) -> [NaiveDate; 7] {
    let start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn due(id: Id, category: Category, y: i32, m: u32, d: u32, h: u32) -> Assignment {
        Assignment {
            id,
            title: format!("A{id}"),
            category,
            total_points: 10.0,
            due_date: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            description: None,
        }
    }

    #[test]
    fn two_assignments_on_same_day_share_a_bucket() {
        let list = vec![
            due(1, Category::Homework, 2024, 3, 5, 23),
            due(2, Category::Quiz, 2024, 3, 5, 9),
            due(3, Category::Test, 2024, 3, 6, 9),
            due(4, Category::Test, 2024, 4, 5, 9),
        ];
        let cal = month_calendar(&list, 2024, 3).unwrap();
        let fifth = cal.day(5).unwrap();
        assert_eq!(fifth.markers.len(), 2);
        assert_eq!(fifth.markers[0].category, Category::Homework);
        assert_eq!(fifth.markers[1].category, Category::Quiz);
        assert_eq!(cal.day(6).unwrap().markers.len(), 1);
        let total: usize = cal.days.iter().map(|d| d.markers.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn weekday_offset_of_the_first() {
        // 2024-03-01 is a Friday
        let march = month_calendar(&[], 2024, 3).unwrap();
        assert_eq!(march.leading_blanks, 5);
        assert_eq!(march.days_in_month, 31);
        assert_eq!(march.weeks(), 6);

        // 2024-09-01 is a Sunday
        let september = month_calendar(&[], 2024, 9).unwrap();
        assert_eq!(september.leading_blanks, 0);
        assert_eq!(september.days_in_month, 30);
        assert_eq!(september.weeks(), 5);
    }

    #[test]
    fn february_lengths_follow_leap_rules() {
        assert_eq!(month_calendar(&[], 2024, 2).unwrap().days_in_month, 29);
        assert_eq!(month_calendar(&[], 2023, 2).unwrap().days_in_month, 28);
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        // 2023-02-01 is a Wednesday, 2024-02-01 a Thursday
        assert_eq!(month_calendar(&[], 2023, 2).unwrap().leading_blanks, 3);
        assert_eq!(month_calendar(&[], 2024, 2).unwrap().leading_blanks, 4);
    }

    #[test]
    fn leap_day_is_bucketed() {
        let list = vec![due(1, Category::Project, 2024, 2, 29, 12)];
        let cal = month_calendar(&list, 2024, 2).unwrap();
        assert_eq!(cal.day(29).unwrap().markers.len(), 1);
        assert!(cal.day(30).is_none());
        assert!(cal.day(0).is_none());
    }

    #[test]
    fn invalid_month_yields_none() {
        assert!(month_calendar(&[], 2024, 0).is_none());
        assert!(month_calendar(&[], 2024, 13).is_none());
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        // Wednesday
        let week = week_of(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        let sunday = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(week_of(sunday)[0], sunday);
    }
}
