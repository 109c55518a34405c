//! # Storage Layer
//!
//! This module defines the in-memory entity store that stands in for a remote data
//! service. One generic [`EntityStore`] is instantiated per entity type; the four
//! instances are owned together by a [`Classroom`].
//!
//! ## Contract
//!
//! | Operation | Result | Fails |
//! |-----------|--------|-------|
//! | `get_all` | copy of every record, insertion order | never |
//! | `get_by_id` | copy of the matching record | `NotFound` |
//! | `get_where` (and the FK/date helpers) | filtered copies, maybe empty | never |
//! | `create` | copy of the stored record with a fresh Id | never |
//! | `update` | copy of the merged record | `NotFound` |
//! | `delete` | `true` | `NotFound` |
//!
//! ### Identity
//!
//! A new record gets `max(existing Ids) + 1`, or `1` when the store is empty. Ids
//! are never reused while a higher Id is alive and never change once assigned.
//!
//! ### Copies, Not References
//!
//! Every read clones. A caller mutating what it got back cannot reach store state.
//!
//! ### No Referential Integrity
//!
//! Foreign keys are not checked on write and deletes do not cascade. Duplicate
//! `(student, assignment)` grades or `(student, date)` attendance records are
//! accepted: the store is append-only with respect to those pairs and callers that
//! want upsert semantics must look before they create (see `commands::grades`).
//!
//! ## Latency and Concurrency
//!
//! Every operation first awaits the store's [`Latency`] source, then runs its
//! critical section synchronously under the store's mutex. Id generation and the
//! read-modify-write of `update`/`delete` therefore never interleave, even when
//! many calls are in flight on a multi-threaded runtime. There is no cancellation:
//! a call always resolves or rejects once its delay elapses.
//!
//! ## Implementations
//!
//! - [`latency::SimulatedLatency`]: production pacing, 200-400ms per operation.
//! - [`latency::NoLatency`]: for tests, resolves immediately.
//! - [`memory::fixtures`]: seeded stores for tests.

use crate::error::{ClassbookError, Result};
use crate::model::{Attendance, Grade, Id, Record};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod classroom;
pub mod latency;
pub mod memory;
pub mod seed;

pub use classroom::Classroom;
pub use latency::{Latency, NoLatency, Op, SimulatedLatency, MAX_SCALE};
pub use seed::Seed;

/// Coerce a user-supplied identifier to an [`Id`].
///
/// Leading whitespace and a `+` sign are skipped and the leading run of digits is
/// used (`"12abc"` is 12). Input with no leading digits, or that resolves to zero,
/// a negative number, or something out of range, has no Id: lookups with it match
/// nothing.
pub fn parse_id(raw: &str) -> Option<Id> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<Id>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}

/// Max plus one; once the max is `Id::MAX`, the lowest unused Id instead.
fn next_id<R: Record>(records: &[R]) -> Id {
    match records.iter().map(Record::id).max() {
        None => 1,
        Some(max) => max.checked_add(1).unwrap_or_else(|| {
            (1..Id::MAX)
                .find(|id| records.iter().all(|r| r.id() != *id))
                .unwrap_or(Id::MAX)
        }),
    }
}

/// An identity-keyed, insertion-ordered collection of one record type.
pub struct EntityStore<R: Record> {
    records: Mutex<Vec<R>>,
    latency: Arc<dyn Latency>,
}

impl<R: Record> EntityStore<R> {
    /// Build a store over an initial snapshot.
    pub fn new(initial: Vec<R>, latency: Arc<dyn Latency>) -> Self {
        Self {
            records: Mutex::new(initial),
            latency,
        }
    }

    pub fn empty(latency: Arc<dyn Latency>) -> Self {
        Self::new(Vec::new(), latency)
    }

    pub async fn get_all(&self) -> Vec<R> {
        self.latency.pause(Op::List).await;
        let records = self.records.lock().await;
        tracing::debug!(entity = %R::ENTITY, count = records.len(), "get_all");
        records.clone()
    }

    pub async fn get_by_id(&self, id: Id) -> Result<R> {
        self.latency.pause(Op::Get).await;
        let records = self.records.lock().await;
        tracing::debug!(entity = %R::ENTITY, id, "get_by_id");
        records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ClassbookError::not_found(R::ENTITY, id))
    }

    /// Filtered copy of the records matching `predicate`. Never fails.
    pub async fn get_where<F>(&self, op: Op, predicate: F) -> Vec<R>
    where
        F: Fn(&R) -> bool + Send,
    {
        self.latency.pause(op).await;
        let records = self.records.lock().await;
        let matched: Vec<R> = records.iter().filter(|r| predicate(r)).cloned().collect();
        tracing::debug!(entity = %R::ENTITY, ?op, matched = matched.len(), "get_where");
        matched
    }

    pub async fn create(&self, draft: R::Draft) -> R {
        self.latency.pause(Op::Create).await;
        let mut records = self.records.lock().await;
        let record = R::from_draft(next_id(&records), draft);
        records.push(record.clone());
        tracing::info!(entity = %R::ENTITY, id = record.id(), "created");
        record
    }

    pub async fn update(&self, id: Id, patch: &R::Patch) -> Result<R> {
        self.latency.pause(Op::Update).await;
        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ClassbookError::not_found(R::ENTITY, id))?;
        *slot = slot.apply(patch);
        tracing::info!(entity = %R::ENTITY, id, "updated");
        Ok(slot.clone())
    }

    pub async fn delete(&self, id: Id) -> Result<bool> {
        self.latency.pause(Op::Delete).await;
        let mut records = self.records.lock().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ClassbookError::not_found(R::ENTITY, id))?;
        records.remove(index);
        tracing::info!(entity = %R::ENTITY, id, "deleted");
        Ok(true)
    }
}

impl EntityStore<Grade> {
    pub async fn get_by_student_id(&self, student_id: Id) -> Vec<Grade> {
        self.get_where(Op::Query, move |g| g.student_id == student_id)
            .await
    }

    pub async fn get_by_assignment_id(&self, assignment_id: Id) -> Vec<Grade> {
        self.get_where(Op::Query, move |g| g.assignment_id == assignment_id)
            .await
    }
}

impl EntityStore<Attendance> {
    pub async fn get_by_student_id(&self, student_id: Id) -> Vec<Attendance> {
        self.get_where(Op::Query, move |a| a.student_id == student_id)
            .await
    }

    /// Records with `start <= date <= end`, compared as instants.
    pub async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Attendance> {
        self.get_where(Op::Range, move |a| a.date >= start && a.date <= end)
            .await
    }

    /// Records whose UTC calendar day falls in `first..=last`, whatever their time of day.
    pub async fn get_by_days(&self, first: NaiveDate, last: NaiveDate) -> Vec<Attendance> {
        self.get_where(Op::Range, move |a| {
            let day = a.date.date_naive();
            day >= first && day <= last
        })
        .await
    }
}
