//! # Command Layer
//!
//! The business operations behind every screen of the classroom manager. Each
//! submodule groups the operations for one area and works directly on a
//! [`Classroom`](crate::store::Classroom).
//!
//! ## Role and Responsibilities
//!
//! - Validate form input before it reaches a store
//! - Fetch everything a view needs **concurrently**, then hand the snapshots to
//!   the [`aggregate`](crate::aggregate) functions
//! - Turn batch edits (a grade column, an attendance week) into concurrent
//!   upserts and report the outcome as a whole
//! - Return a structured [`CmdResult`] carrying the data plus leveled messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr or terminal formatting
//! - **Id coercion**: callers pass typed [`Id`](crate::model::Id)s; the
//!   [`api`](crate::api) facade deals with raw user input
//! - **Rollback**: a failed write in a batch leaves the successful ones in place
//!
//! ## Fetch Then Aggregate
//!
//! Views that need more than one collection start every fetch at once with
//! `tokio::try_join!` and aggregate only when all of them succeeded. The first
//! failure is returned unchanged.
//!
//! ## Command Modules
//!
//! - [`students`]: roster listing with per-student stats, create, edit, delete
//! - [`assignments`]: list, create, edit, delete
//! - [`grades`]: the grade matrix for one assignment and its batch save
//! - [`attendance`]: the weekly attendance grid and its batch save
//! - [`reports`]: per-student reports, class overview, CSV export
//! - [`dashboard`]: headline stats, upcoming work, today's attendance, activity
//! - [`calendar`]: assignment due dates bucketed by month
//! - [`validate`]: form checks shared by create and edit

use crate::error::{ClassbookError, Result};
use futures::future::join_all;
use serde::Serialize;
use std::future::Future;

pub mod assignments;
pub mod attendance;
pub mod calendar;
pub mod dashboard;
pub mod grades;
pub mod reports;
pub mod students;
pub mod validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command hands back: its data plus messages for the user.
#[derive(Debug, Clone, Serialize)]
pub struct CmdResult<T> {
    pub value: T,
    pub messages: Vec<CmdMessage>,
}

impl<T> CmdResult<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Lift a read that cannot fail into a `Result` so it can join a `try_join!`.
pub(crate) async fn fetched<T>(read: impl Future<Output = T>) -> Result<T> {
    Ok(read.await)
}

/// Run every write at once and wait for all of them.
///
/// Succeeds with the written records in input order when every write succeeded.
/// Otherwise returns [`ClassbookError::Batch`] holding each inner error; writes
/// that went through stay written.
pub async fn join_writes<T, F>(writes: Vec<F>) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    let total = writes.len();
    let mut saved = Vec::with_capacity(total);
    let mut failed = Vec::new();

    for outcome in join_all(writes).await {
        match outcome {
            Ok(record) => saved.push(record),
            Err(e) => failed.push(e),
        }
    }

    if failed.is_empty() {
        Ok(saved)
    } else {
        tracing::warn!(failed = failed.len(), total, "batch save incomplete");
        Err(ClassbookError::Batch { failed, total })
    }
}
