use crate::model::EntityKind;
use thiserror::Error;

/// A single failed form check, reported back to the UI next to its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum ClassbookError {
    /// The only error a store raises: the identifier matched no record.
    /// `id` keeps the raw input so non-numeric identifiers can be reported.
    #[error("{entity} with Id {id} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("Invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// Some writes of a batch failed. The ones that succeeded are not rolled back.
    #[error("{} of {total} writes failed", failed.len())]
    Batch {
        failed: Vec<ClassbookError>,
        total: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl ClassbookError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        ClassbookError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClassbookError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClassbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = ClassbookError::not_found(EntityKind::Student, 42);
        assert_eq!(err.to_string(), "Student with Id 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_message_lists_fields() {
        let err = ClassbookError::Validation(vec![
            FieldError::new("firstName", "First name is required"),
            FieldError::new("email", "Email is invalid"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid input: firstName: First name is required; email: Email is invalid"
        );
    }

    #[test]
    fn batch_message_counts_failures() {
        let err = ClassbookError::Batch {
            failed: vec![ClassbookError::not_found(EntityKind::Grade, 9)],
            total: 3,
        };
        assert_eq!(err.to_string(), "1 of 3 writes failed");
        assert!(!err.is_not_found());
    }
}
