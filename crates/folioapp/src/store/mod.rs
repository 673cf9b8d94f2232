//! # Storage Layer
//!
//! Everything folio persists goes through one flat, string-keyed store with
//! synchronous `get` / `set` / `remove`, the same contract a browser's local
//! storage offers. There is no atomicity across keys and no versioning.
//!
//! ## Key Scheme
//!
//! | Key | Owner | Value |
//! |-----|-------|-------|
//! | `draft-<formId>` | [`crate::drafts`] | JSON object of field name → value |
//! | `theme` | [`crate::theme`] | `light` or `dark` |
//!
//! Each key has exactly one writer, so last write wins and no locking is needed.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production store, a single `storage.json` map
//!   rewritten atomically on every change.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::KeyValueStore;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
