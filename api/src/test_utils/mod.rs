//! Test utilities
//!
//! Fixtures, an in-memory SQLite bootstrap, and manual mocks for the
//! ports that are awkward to drive for real (contacts store, system tray,
//! browser).
//!
//! Repository and handler tests run against a fresh `sqlite::memory:`
//! database each, so they exercise the real SQL and need no setup.

pub mod db;
pub mod fixtures;
pub mod mocks;
pub mod server;

pub use db::*;
pub use fixtures::*;
pub use mocks::*;
pub use server::*;
