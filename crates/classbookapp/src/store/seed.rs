//! Initial snapshot the stores are built from.
//!
//! A seed is one list of records per entity type. It is the only "persisted state"
//! the core ever sees; where it comes from (embedded demo data, a file on disk) is
//! up to the caller.

use crate::error::{ClassbookError, Result};
use crate::model::{Assignment, Attendance, Grade, Id, Record, Student};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const DEMO_SEED: &str = include_str!("../../seed/demo.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default)]
    pub attendance: Vec<Attendance>,
}

impl Seed {
    /// The demo classroom bundled with the library.
    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seed: Seed = serde_json::from_str(json)?;
        seed.check_ids()?;
        Ok(seed)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(ClassbookError::Io)?;
        Self::from_json(&content)
    }

    /// Ids must be positive, below `Id::MAX` and unique within each entity type.
    /// Foreign keys are not checked.
    pub fn check_ids(&self) -> Result<()> {
        check_unique(&self.students)?;
        check_unique(&self.assignments)?;
        check_unique(&self.grades)?;
        check_unique(&self.attendance)?;
        Ok(())
    }
}

fn check_unique<R: Record>(records: &[R]) -> Result<()> {
    let mut seen: HashSet<Id> = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if id == 0 {
            return Err(ClassbookError::Config(format!(
                "{} seed record has Id 0; Ids start at 1",
                R::ENTITY
            )));
        }
        if id == Id::MAX {
            return Err(ClassbookError::Config(format!(
                "{} seed record has Id {}; Ids must be below {}",
                R::ENTITY,
                id,
                Id::MAX
            )));
        }
        if !seen.insert(id) {
            return Err(ClassbookError::Config(format!(
                "duplicate {} Id {} in seed",
                R::ENTITY,
                id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_parses() {
        let seed = Seed::demo().unwrap();
        assert!(!seed.students.is_empty());
        assert!(!seed.assignments.is_empty());
        assert!(!seed.grades.is_empty());
        assert!(!seed.attendance.is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = Seed::from_json(r#"{ "students": [] }"#).unwrap();
        assert_eq!(seed, Seed::default());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{
            "grades": [
                { "Id": 1, "studentId": 1, "assignmentId": 1, "score": 5, "submittedDate": "2024-01-01T00:00:00Z" },
                { "Id": 1, "studentId": 2, "assignmentId": 1, "score": 7, "submittedDate": "2024-01-01T00:00:00Z" }
            ]
        }"#;
        match Seed::from_json(json) {
            Err(ClassbookError::Config(msg)) => assert!(msg.contains("duplicate Grade Id 1")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn largest_id_is_rejected() {
        let json = r#"{
            "students": [
                { "Id": 4294967295, "firstName": "A", "lastName": "B", "grade": "K", "email": "a@b.c", "enrollmentDate": "2024-01-01T00:00:00Z" }
            ]
        }"#;
        match Seed::from_json(json) {
            Err(ClassbookError::Config(msg)) => assert!(msg.contains("Id 4294967295")),
            other => panic!("expected config error, got {other:?}"),
        }

        let below = json.replace("4294967295", "4294967294");
        assert_eq!(Seed::from_json(&below).unwrap().students[0].id, 4294967294);
    }

    #[test]
    fn dangling_foreign_keys_are_allowed() {
        let json = r#"{
            "attendance": [
                { "Id": 3, "studentId": 404, "date": "2024-01-01T08:00:00Z", "status": "present" }
            ]
        }"#;
        let seed = Seed::from_json(json).unwrap();
        assert_eq!(seed.attendance[0].student_id, 404);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, r#"{ "students": [ { "Id": 9, "firstName": "A", "lastName": "B", "grade": "K", "email": "a@b.c", "enrollmentDate": "2024-01-01T00:00:00Z" } ] }"#).unwrap();

        let seed = Seed::load(&path).unwrap();
        assert_eq!(seed.students[0].id, 9);
        assert!(matches!(
            Seed::load(dir.path().join("missing.json")),
            Err(ClassbookError::Io(_))
        ));
    }
}
