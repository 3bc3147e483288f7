//! Configuration management for `CarbonBuddy`.
//!
//! Application settings come from environment variables (loaded from `.env`
//! by the binary) with local-development defaults. The emission factor table
//! is loaded once at startup from a TOML file; any problem with it is fatal.

/// Database connection and table creation
pub mod database;

/// Emission factor table loading from factors.toml
pub mod factors;

use crate::errors::Result;

/// Default database location when `DATABASE_URL` is not set.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/carbon_buddy.sqlite?mode=rwc";

/// Default factor table location when `FACTOR_TABLE_PATH` is not set.
const DEFAULT_FACTOR_TABLE_PATH: &str = "factors.toml";

/// Top-level application configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SeaORM connection URL for the persistence store
    pub database_url: String,
    /// Path to the emission factor table file
    pub factor_table_path: String,
}

/// Resolves the application configuration from the environment.
///
/// Both settings fall back to local defaults so a fresh checkout runs
/// without any environment setup.
pub fn load_app_configuration() -> Result<AppConfig> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let factor_table_path = std::env::var("FACTOR_TABLE_PATH")
        .unwrap_or_else(|_| DEFAULT_FACTOR_TABLE_PATH.to_string());

    Ok(AppConfig {
        database_url,
        factor_table_path,
    })
}
