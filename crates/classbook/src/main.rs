//! # Classbook CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/classbookapp/`: core library with UI-agnostic classroom logic
//! - `crates/classbook/`: this CLI tool, depends on the `classbookapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/classbook/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and dispatch (commands.rs)               │
//! │  - One handler per command (handlers.rs)                    │
//! │  - Colored tables (render.rs)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/classbookapp/src/api.rs)                 │
//! │  - Coerces raw ids, returns CmdResult values                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns argument parsing,
//! the tokio runtime, log output, rendering and the exit code.
//!
//! ## Testing Approach
//!
//! - **Parsing and rendering**: unit tests beside `setup.rs` and `render.rs`.
//! - **End to end**: `tests/cli.rs` runs the binary with `assert_cmd` against a
//!   temporary config directory and `--no-latency`.

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
