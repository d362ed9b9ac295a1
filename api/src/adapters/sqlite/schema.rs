//! Connection and schema bootstrap
//!
//! Tables are derived from the SeaORM entities and created when missing,
//! parents before children so the foreign keys resolve.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entity::{cars, contacts, interventions, operation_lines, operations};

/// Open the database and make sure the schema exists
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    // Every connection to an in-memory database sees its own empty store.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    create_schema(&db).await?;
    Ok(db)
}

/// Create every table that does not exist yet
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        schema.create_table_from_entity(cars::Entity),
        schema.create_table_from_entity(interventions::Entity),
        schema.create_table_from_entity(operations::Entity),
        schema.create_table_from_entity(operation_lines::Entity),
        schema.create_table_from_entity(contacts::Entity),
    ];

    for mut statement in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    tracing::debug!("Database schema ready");
    Ok(())
}
