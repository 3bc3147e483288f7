//! Database configuration module for `CarbonBuddy`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{Prediction, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Idempotent: existing tables are left untouched, so this runs safely on
/// every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    user_table.if_not_exists();
    let mut prediction_table = schema.create_table_from_entity(Prediction);
    prediction_table.if_not_exists();

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&prediction_table)).await?;

    Ok(())
}
