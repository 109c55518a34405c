use crate::model::{GradeLevel, Student};

/// Students matching a free-text search and, optionally, a grade level.
///
/// The search is case-insensitive against "first last" and the email address.
/// A blank search matches everyone.
pub fn filter_students(
    students: &[Student],
    search: Option<&str>,
    grade: Option<GradeLevel>,
) -> Vec<Student> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    students
        .iter()
        .filter(|s| {
            let matches_search = needle.as_ref().map_or(true, |n| {
                s.full_name().to_lowercase().contains(n.as_str())
                    || s.email.to_lowercase().contains(n.as_str())
            });
            let matches_grade = grade.map_or(true, |g| s.grade == g);
            matches_search && matches_grade
        })
        .cloned()
        .collect()
}
