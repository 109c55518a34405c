//! # Classroom
//!
//! Owns the four entity stores (students, assignments, grades, attendance) and the
//! latency source they share. This is the composition root: build one per
//! application (or per test) instead of reaching for a global.

use super::latency::{Latency, NoLatency};
use super::seed::Seed;
use super::EntityStore;
use crate::model::{Assignment, Attendance, Grade, Student};
use std::sync::Arc;

pub struct Classroom {
    pub students: EntityStore<Student>,
    pub assignments: EntityStore<Assignment>,
    pub grades: EntityStore<Grade>,
    pub attendance: EntityStore<Attendance>,
}

impl Classroom {
    pub fn from_seed(seed: Seed, latency: Arc<dyn Latency>) -> Self {
        tracing::debug!(
            students = seed.students.len(),
            assignments = seed.assignments.len(),
            grades = seed.grades.len(),
            attendance = seed.attendance.len(),
            "building classroom from seed"
        );
        Self {
            students: EntityStore::new(seed.students, Arc::clone(&latency)),
            assignments: EntityStore::new(seed.assignments, Arc::clone(&latency)),
            grades: EntityStore::new(seed.grades, Arc::clone(&latency)),
            attendance: EntityStore::new(seed.attendance, latency),
        }
    }

    pub fn empty(latency: Arc<dyn Latency>) -> Self {
        Self::from_seed(Seed::default(), latency)
    }

    /// Seeded classroom that never sleeps.
    pub fn instant(seed: Seed) -> Self {
        Self::from_seed(seed, Arc::new(NoLatency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_are_isolated_per_classroom() {
        let seed = Seed::demo().unwrap();
        let a = Classroom::instant(seed.clone());
        let b = Classroom::instant(seed);

        a.students.delete(1).await.unwrap();
        assert!(a.students.get_by_id(1).await.is_err());
        assert!(b.students.get_by_id(1).await.is_ok());
    }

    #[tokio::test]
    async fn empty_classroom_has_no_records() {
        let room = Classroom::empty(Arc::new(NoLatency));
        assert!(room.students.get_all().await.is_empty());
        assert!(room.assignments.get_all().await.is_empty());
        assert!(room.grades.get_all().await.is_empty());
        assert!(room.attendance.get_all().await.is_empty());
    }
}
