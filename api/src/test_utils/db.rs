//! In-memory database for tests

use sea_orm::DatabaseConnection;

use crate::adapters::sqlite::connect;

/// Open a private in-memory database with the schema in place
pub async fn test_db() -> DatabaseConnection {
    connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}
