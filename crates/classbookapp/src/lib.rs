//! # Classbook Architecture
//!
//! Classbook is a **UI-agnostic classroom manager**: a student roster, a gradebook,
//! weekly attendance and the reports derived from them. The library owns all of
//! the data and logic; the `classbook` binary is just one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/classbook)                                     │
//! │  - Parses arguments, renders tables, sets the exit code     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Coerces raw identifiers, owns the Classroom and settings  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, concurrent fetches, batch upserts            │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌────────────────────────────┐  ┌────────────────────────────┐
//! │  Aggregation (aggregate/)  │  │  Stores (store/)           │
//! │  - Pure functions over     │  │  - One EntityStore per     │
//! │    fetched snapshots       │  │    entity, async, cloned   │
//! └────────────────────────────┘  └────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It never
//! writes to stdout or stderr and never exits the process. Logging goes through
//! `tracing`; the client decides whether and where it is shown.
//!
//! ## State
//!
//! Everything lives in memory for the life of a [`Classroom`](store::Classroom),
//! starting from a seed snapshot. Nothing is written back.
//!
//! ## Testing Strategy
//!
//! 1. **Stores and aggregation**: unit tests beside the code, zero latency.
//! 2. **Commands**: the bulk of the tests, built on
//!    `store::memory::fixtures::StoreFixture`.
//! 3. **API**: integration tests in `tests/` drive whole scenarios through the
//!    facade with raw string identifiers.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for every operation
//! - [`commands`]: Business operations for each screen
//! - [`aggregate`]: Averages, rates, calendars and CSV from record snapshots
//! - [`store`]: Entity stores, latency, seed snapshots, the `Classroom`
//! - [`model`]: Records, drafts and patches
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod aggregate;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
