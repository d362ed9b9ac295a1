//! SQLite adapters
//!
//! Implementations of repository traits using SeaORM and SQLite.

pub mod car_repo;
pub mod contact_repo;
mod graph;
pub mod intervention_repo;
pub mod operation_line_repo;
pub mod operation_repo;
pub mod schema;


pub use car_repo::SqliteCarRepository;
pub use contact_repo::SqliteContactRepository;
pub use intervention_repo::SqliteInterventionRepository;
pub use operation_line_repo::SqliteOperationLineRepository;
pub use operation_repo::SqliteOperationRepository;
pub use schema::connect;

use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

/// Classify a storage error
///
/// Unique violations surface as conflicts and foreign key violations as a
/// missing parent; anything else is an opaque database failure.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::NotFound(msg),
        _ => DomainError::Database(e.to_string()),
    }
}
