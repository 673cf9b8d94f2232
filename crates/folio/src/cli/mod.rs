//! # CLI Layer
//!
//! This is **one possible host** for folio, not the application itself.
//! It plays the role a browser page plays: it renders a form (from a JSON
//! description), delivers input and submit events, waits for autosave timers
//! and shows notices. All rules live in `folioapp`.
//!
//! ## Form Descriptions
//!
//! ```json
//! {
//!   "id": "contact",
//!   "autosave": true,
//!   "fields": [
//!     { "name": "name", "required": true },
//!     { "name": "email", "kind": "email", "required": true },
//!     { "name": "cv", "kind": "file" }
//!   ]
//! }
//! ```
//!
//! ## Module Structure
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: context initialization and per-command handlers
//! - `render.rs`: terminal output

mod commands;
mod render;
mod setup;

pub use commands::run;
