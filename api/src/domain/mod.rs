//! Domain layer
//!
//! The garage's business model, free of HTTP and storage concerns.
//! - `entities`: cars, their intervention history, and contacts
//! - `ports`: repository traits the SQLite adapters implement

pub mod entities;
pub mod ports;
