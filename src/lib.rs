//! Core library surface for the School Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the SQLite persistence layer, the two domain records, and the
//! interactive application shell.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to initialize the embedded SQLite store and
/// preload data.
pub use db::{ensure_schema, fetch_teachers};

/// The two primary domain types that other layers manipulate.
pub use models::{Course, Teacher};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
