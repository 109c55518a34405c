//! # Data Model
//!
//! Four entity types live in the classroom: [`Student`], [`Assignment`], [`Grade`]
//! and [`Attendance`]. Every record carries an integer [`Id`] assigned by its store
//! on creation. Clients never supply one.
//!
//! ## Drafts and Patches
//!
//! Each entity comes with two companion types:
//! - a **draft** (`StudentDraft`, ...): every field except the Id, the input to `create`
//! - a **patch** (`StudentPatch`, ...): every field optional, the input to `update`
//!
//! [`Record::apply`] merges a patch over a record field by field and returns a new
//! value. Fields left as `None` keep the base value. Optional text fields are
//! `Option<Option<String>>` in patches so an update can clear them.
//!
//! ## Foreign Keys
//!
//! `Grade::student_id`, `Grade::assignment_id` and `Attendance::student_id` are plain
//! integers. Nothing enforces that the referenced record exists, and deleting a
//! student does not cascade. Readers must tolerate dangling references.
//!
//! ## Wire Shape
//!
//! Records serialize with the field names of the seed snapshot (`Id`, `firstName`,
//! `enrollmentDate`, ...) so a snapshot exported elsewhere loads unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identity. Always >= 1 for a stored record.
pub type Id = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Student,
    Assignment,
    Grade,
    Attendance,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Student => "Student",
            EntityKind::Assignment => "Assignment",
            EntityKind::Grade => "Grade",
            EntityKind::Attendance => "Attendance record",
        };
        f.write_str(name)
    }
}

/// A record kept in an [`EntityStore`](crate::store::EntityStore).
pub trait Record: Clone + Send + Sync + 'static {
    const ENTITY: EntityKind;

    /// Everything but the Id.
    type Draft: Send;

    /// Field-by-field update.
    type Patch: Send + Sync;

    fn id(&self) -> Id;

    fn from_draft(id: Id, draft: Self::Draft) -> Self;

    /// Returns a new record with the patch's fields overwritten.
    fn apply(&self, patch: &Self::Patch) -> Self;
}

fn merge<T: Clone>(base: &T, patch: &Option<T>) -> T {
    patch.as_ref().unwrap_or(base).clone()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseTokenError {}

// --- Enumerations ---

/// School grade level, "K" through "12".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "K")]
    Kindergarten,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "6")]
    Sixth,
    #[serde(rename = "7")]
    Seventh,
    #[serde(rename = "8")]
    Eighth,
    #[serde(rename = "9")]
    Ninth,
    #[serde(rename = "10")]
    Tenth,
    #[serde(rename = "11")]
    Eleventh,
    #[serde(rename = "12")]
    Twelfth,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 13] = [
        GradeLevel::Kindergarten,
        GradeLevel::First,
        GradeLevel::Second,
        GradeLevel::Third,
        GradeLevel::Fourth,
        GradeLevel::Fifth,
        GradeLevel::Sixth,
        GradeLevel::Seventh,
        GradeLevel::Eighth,
        GradeLevel::Ninth,
        GradeLevel::Tenth,
        GradeLevel::Eleventh,
        GradeLevel::Twelfth,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            GradeLevel::Kindergarten => "K",
            GradeLevel::First => "1",
            GradeLevel::Second => "2",
            GradeLevel::Third => "3",
            GradeLevel::Fourth => "4",
            GradeLevel::Fifth => "5",
            GradeLevel::Sixth => "6",
            GradeLevel::Seventh => "7",
            GradeLevel::Eighth => "8",
            GradeLevel::Ninth => "9",
            GradeLevel::Tenth => "10",
            GradeLevel::Eleventh => "11",
            GradeLevel::Twelfth => "12",
        }
    }

    /// Human label, e.g. "Kindergarten" or "3rd Grade".
    pub fn label(&self) -> String {
        match self {
            GradeLevel::Kindergarten => "Kindergarten".to_string(),
            GradeLevel::First => "1st Grade".to_string(),
            GradeLevel::Second => "2nd Grade".to_string(),
            GradeLevel::Third => "3rd Grade".to_string(),
            other => format!("{}th Grade", other.token()),
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for GradeLevel {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        GradeLevel::ALL
            .iter()
            .find(|level| level.token().eq_ignore_ascii_case(token))
            .copied()
            .ok_or_else(|| ParseTokenError {
                kind: "grade level",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
        })
    }
}

impl FromStr for StudentStatus {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            _ => Err(ParseTokenError {
                kind: "student status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Homework,
    Quiz,
    Test,
    Project,
    Participation,
    ExtraCredit,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Homework,
        Category::Quiz,
        Category::Test,
        Category::Project,
        Category::Participation,
        Category::ExtraCredit,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Category::Homework => "homework",
            Category::Quiz => "quiz",
            Category::Test => "test",
            Category::Project => "project",
            Category::Participation => "participation",
            Category::ExtraCredit => "extra-credit",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Category {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Category::ALL
            .iter()
            .find(|c| c.token() == token)
            .copied()
            .ok_or_else(|| ParseTokenError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
        AttendanceStatus::Excused,
    ];
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        })
    }
}

impl FromStr for AttendanceStatus {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "excused" => Ok(AttendanceStatus::Excused),
            _ => Err(ParseTokenError {
                kind: "attendance status",
                value: s.to_string(),
            }),
        }
    }
}

// --- Student ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "Id")]
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub grade: GradeLevel,
    pub email: String,
    pub enrollment_date: DateTime<Utc>,
    #[serde(default)]
    pub status: StudentStatus,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub grade: GradeLevel,
    pub email: String,
    pub enrollment_date: DateTime<Utc>,
    #[serde(default)]
    pub status: StudentStatus,
}

impl StudentDraft {
    /// An active student enrolled now.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        grade: GradeLevel,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            grade,
            email: email.into(),
            enrollment_date: Utc::now(),
            status: StudentStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub grade: Option<GradeLevel>,
    pub email: Option<String>,
    pub enrollment_date: Option<DateTime<Utc>>,
    pub status: Option<StudentStatus>,
}

impl Record for Student {
    const ENTITY: EntityKind = EntityKind::Student;
    type Draft = StudentDraft;
    type Patch = StudentPatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: StudentDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            grade: draft.grade,
            email: draft.email,
            enrollment_date: draft.enrollment_date,
            status: draft.status,
        }
    }

    fn apply(&self, patch: &StudentPatch) -> Self {
        Self {
            id: self.id,
            first_name: merge(&self.first_name, &patch.first_name),
            last_name: merge(&self.last_name, &patch.last_name),
            grade: merge(&self.grade, &patch.grade),
            email: merge(&self.email, &patch.email),
            enrollment_date: merge(&self.enrollment_date, &patch.enrollment_date),
            status: merge(&self.status, &patch.status),
        }
    }
}

// --- Assignment ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "Id")]
    pub id: Id,
    pub title: String,
    pub category: Category,
    pub total_points: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    pub title: String,
    pub category: Category,
    pub total_points: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub total_points: Option<f64>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<Option<String>>,
}

impl Record for Assignment {
    const ENTITY: EntityKind = EntityKind::Assignment;
    type Draft = AssignmentDraft;
    type Patch = AssignmentPatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: AssignmentDraft) -> Self {
        Self {
            id,
            title: draft.title,
            category: draft.category,
            total_points: draft.total_points,
            due_date: draft.due_date,
            description: draft.description,
        }
    }

    fn apply(&self, patch: &AssignmentPatch) -> Self {
        Self {
            id: self.id,
            title: merge(&self.title, &patch.title),
            category: merge(&self.category, &patch.category),
            total_points: merge(&self.total_points, &patch.total_points),
            due_date: merge(&self.due_date, &patch.due_date),
            description: merge(&self.description, &patch.description),
        }
    }
}

// --- Grade ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(rename = "Id")]
    pub id: Id,
    pub student_id: Id,
    pub assignment_id: Id,
    /// Expected within `0..=total_points` but not enforced.
    pub score: f64,
    pub submitted_date: DateTime<Utc>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDraft {
    pub student_id: Id,
    pub assignment_id: Id,
    pub score: f64,
    pub submitted_date: DateTime<Utc>,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradePatch {
    pub student_id: Option<Id>,
    pub assignment_id: Option<Id>,
    pub score: Option<f64>,
    pub submitted_date: Option<DateTime<Utc>>,
    pub comments: Option<Option<String>>,
}

impl Record for Grade {
    const ENTITY: EntityKind = EntityKind::Grade;
    type Draft = GradeDraft;
    type Patch = GradePatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: GradeDraft) -> Self {
        Self {
            id,
            student_id: draft.student_id,
            assignment_id: draft.assignment_id,
            score: draft.score,
            submitted_date: draft.submitted_date,
            comments: draft.comments,
        }
    }

    fn apply(&self, patch: &GradePatch) -> Self {
        Self {
            id: self.id,
            student_id: merge(&self.student_id, &patch.student_id),
            assignment_id: merge(&self.assignment_id, &patch.assignment_id),
            score: merge(&self.score, &patch.score),
            submitted_date: merge(&self.submitted_date, &patch.submitted_date),
            comments: merge(&self.comments, &patch.comments),
        }
    }
}

// --- Attendance ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[serde(rename = "Id")]
    pub id: Id,
    pub student_id: Id,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDraft {
    pub student_id: Id,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendancePatch {
    pub student_id: Option<Id>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<Option<String>>,
}

impl Record for Attendance {
    const ENTITY: EntityKind = EntityKind::Attendance;
    type Draft = AttendanceDraft;
    type Patch = AttendancePatch;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, draft: AttendanceDraft) -> Self {
        Self {
            id,
            student_id: draft.student_id,
            date: draft.date,
            status: draft.status,
            notes: draft.notes,
        }
    }

    fn apply(&self, patch: &AttendancePatch) -> Self {
        Self {
            id: self.id,
            student_id: merge(&self.student_id, &patch.student_id),
            date: merge(&self.date, &patch.date),
            status: merge(&self.status, &patch.status),
            notes: merge(&self.notes, &patch.notes),
        }
    }
}
