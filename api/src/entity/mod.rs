//! SeaORM entities
//!
//! Table models for the SQLite store. Column names follow the historical
//! camelCase schema so an existing database file stays readable.

pub mod cars;
pub mod contacts;
pub mod interventions;
pub mod operation_lines;
pub mod operations;
