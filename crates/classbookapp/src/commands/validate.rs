//! Form checks run before a create or update reaches a store.
//!
//! Every failing field is reported at once in a single
//! [`ClassbookError::Validation`]. Patches are checked only for the fields they set.

use crate::error::{ClassbookError, FieldError, Result};
use crate::model::{AssignmentDraft, AssignmentPatch, StudentDraft, StudentPatch};
use once_cell::sync::Lazy;
use regex::Regex;

// something@something.something, anywhere in the value
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

fn looks_like_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

fn finish(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClassbookError::Validation(errors))
    }
}

fn required(errors: &mut Vec<FieldError>, field: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    }
}

fn email(errors: &mut Vec<FieldError>, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !looks_like_email(value) {
        errors.push(FieldError::new("email", "Email is invalid"));
    }
}

fn total_points(errors: &mut Vec<FieldError>, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(FieldError::new(
            "totalPoints",
            "Total points must be a positive number",
        ));
    }
}

pub fn student_draft(draft: &StudentDraft) -> Result<()> {
    let mut errors = Vec::new();
    required(&mut errors, "firstName", "First name", &draft.first_name);
    required(&mut errors, "lastName", "Last name", &draft.last_name);
    email(&mut errors, &draft.email);
    finish(errors)
}

pub fn student_patch(patch: &StudentPatch) -> Result<()> {
    let mut errors = Vec::new();
    if let Some(first) = &patch.first_name {
        required(&mut errors, "firstName", "First name", first);
    }
    if let Some(last) = &patch.last_name {
        required(&mut errors, "lastName", "Last name", last);
    }
    if let Some(address) = &patch.email {
        email(&mut errors, address);
    }
    finish(errors)
}

pub fn assignment_draft(draft: &AssignmentDraft) -> Result<()> {
    let mut errors = Vec::new();
    required(&mut errors, "title", "Assignment title", &draft.title);
    total_points(&mut errors, draft.total_points);
    finish(errors)
}

pub fn assignment_patch(patch: &AssignmentPatch) -> Result<()> {
    let mut errors = Vec::new();
    if let Some(title) = &patch.title {
        required(&mut errors, "title", "Assignment title", title);
    }
    if let Some(points) = patch.total_points {
        total_points(&mut errors, points);
    }
    finish(errors)
}
