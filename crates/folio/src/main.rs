//! # Folio CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/folioapp/` — UI-agnostic library: validation, drafts, notices, storage
//! - `crates/folio/` — This CLI, one host among others for `folioapp`
//!
//! Everything in `folioapp` is host agnostic: functions take normal Rust
//! values, return normal Rust types, and never print. The CLI is therefore
//! responsible for **all** user-facing concerns: argument parsing, context
//! initialization, waiting on autosave timers, error handling, and rendering.
//!
//! ## Testing Approach
//!
//! - **folioapp**: unit tests next to each module, driven by `MemBackend` and
//!   `ManualClock`, plus filesystem integration tests.
//! - **CLI**: clap parsing tests in `setup.rs` and end-to-end runs of the
//!   binary in `tests/`.

mod cli;
mod clipboard;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
