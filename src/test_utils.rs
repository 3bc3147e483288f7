//! Shared test utilities for `CarbonBuddy`.
//!
//! This module provides common helper functions for setting up test
//! databases, building the reference factor table, and creating test
//! accounts with sensible defaults.

use crate::{
    config::factors::FactorRow,
    core::{
        account,
        footprint::{FactorTable, FoodType, LifestyleInput, VehicleType},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds the reference factor table (the same values shipped in
/// factors.toml) without touching the filesystem.
///
/// # Panics
/// Panics if the reference rows are invalid, which would be a bug in the
/// test data itself.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_factor_table() -> FactorTable {
    let rows = [
        ("vehicle", "bike", 0.0),
        ("vehicle", "petrol_car", 0.19),
        ("vehicle", "diesel_car", 0.25),
        ("vehicle", "ev", 0.05),
        ("vehicle", "bus", 0.10),
        ("vehicle", "train", 0.04),
        ("electricity", "india_kwh", 0.82),
        ("food", "veg", 1.5),
        ("food", "mixed", 2.5),
        ("food", "non_veg", 3.5),
        ("waste", "kg", 0.9),
    ]
    .into_iter()
    .map(|(category, kind, factor)| FactorRow {
        category: category.to_string(),
        kind: kind.to_string(),
        factor,
    })
    .collect();

    FactorTable::from_rows(rows).unwrap()
}

/// A typical day's lifestyle inputs.
#[must_use]
pub const fn sample_input() -> LifestyleInput {
    LifestyleInput {
        vehicle_type: VehicleType::Bus,
        vehicle_km: 12.0,
        electricity_kwh: 4.0,
        food_type: FoodType::Mixed,
        waste_kg: 1.0,
    }
}

/// Registers a test account with a fixed password.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    account::register(db, username, "test-password").await
}
