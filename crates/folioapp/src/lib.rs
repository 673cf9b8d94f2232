//! # Folio Architecture
//!
//! Folio is the **form layer** of a portfolio site, written without a DOM. It
//! validates fields, autosaves in-progress forms as drafts and restores them on
//! the next visit. A browser binding, a test and the `folio` CLI all drive the
//! same code.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (browser binding, CLI, tests)                         │
//! │  - Delivers blur / input / submit events and timer ticks    │
//! │  - Implements FormView to reflect field state               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns registered forms, drafts and notices                │
//! │  - Routes events by form id, wires autosave                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (form.rs, validation.rs, drafts.rs, notify.rs)      │
//! │  - Pure rules and state machines                            │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait                                      │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Single Thread, Explicit Time
//!
//! Everything runs on one thread in response to discrete events. The only
//! asynchronous primitive is the autosave timer, and it is modeled as data: a
//! deadline per form, read through a [`clock::Clock`]. Hosts wait for
//! [`api::FolioApi::next_deadline`] and then call [`api::FolioApi::tick`].
//! Tests advance a [`clock::ManualClock`] instead of sleeping.
//!
//! ## Failure Policy
//!
//! Nothing here ever halts the page. User mistakes become inline field
//! messages. Storage problems (unreadable drafts, failed writes) are logged
//! through `tracing` and otherwise behave as if autosave were absent.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for hosts
//! - [`validation`]: Field rules and verdicts
//! - [`form`]: Blur / input / submit handling and the `FormView` port
//! - [`drafts`]: Debounced draft persistence
//! - [`notify`]: Transient notices
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`model`]: Core data types (`Field`, `Form`, `Draft`)
//! - [`theme`], [`search`], [`upload`], [`scroll`]: Small page helpers
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod config;
pub mod drafts;
pub mod error;
pub mod form;
pub mod model;
pub mod notify;
pub mod scroll;
pub mod search;
pub mod store;
pub mod theme;
pub mod upload;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
