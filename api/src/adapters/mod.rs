//! Adapters layer
//!
//! Implementations of domain ports for external systems.

pub mod sqlite;

pub use sqlite::{
    connect, SqliteCarRepository, SqliteContactRepository, SqliteInterventionRepository,
    SqliteOperationLineRepository, SqliteOperationRepository,
};
