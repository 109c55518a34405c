//! # CLI Behavior
//!
//! This is **one possible UI client** for classbook, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Session State
//!
//! Each invocation builds a fresh classroom from the seed snapshot (the demo class,
//! `seed_path` from the config, or `--seed`). Edits made by one command are visible
//! to nothing after it. Scripts that need a sequence of edits should drive
//! `classbookapp::api::ClassbookApi` directly.
//!
//! ## Identifiers
//!
//! Ids are typed as text and handed to the API unchanged. `classbook students show abc`
//! reports `Student with Id abc not found` rather than a parse error.
//!
//! ## Messages
//!
//! Every command returns messages alongside its value. They are printed after the
//! value: info dimmed, success green, warning yellow, error red.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap, help text
//! - `commands`: logging, configuration, dispatch
//! - `handlers`: one function per command, calling the API and printing
//! - `render`: output formatting (tables, colors, messages)

mod commands;
mod handlers;
mod render;
pub mod setup;

pub use commands::run;
