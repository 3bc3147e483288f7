//! Emission factor table loading from a TOML file.
//!
//! The factor table is the only numeric configuration the engine has: a flat
//! list of `[[factors]]` rows with `category`, `type`, and `factor` columns.
//! It is loaded once at startup and is read-only afterwards. A missing file,
//! malformed row, unknown category, negative factor, or duplicate
//! (category, type) pair is a fatal configuration error - the process must
//! not start under-reporting emissions because of a bad table.

use crate::core::footprint::FactorTable;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// File structure representing the entire factors.toml file
#[derive(Debug, Deserialize)]
pub struct FactorFile {
    /// List of factor rows
    pub factors: Vec<FactorRow>,
}

/// One row of the factor table
#[derive(Debug, Deserialize, Clone)]
pub struct FactorRow {
    /// Emission category: `"vehicle"`, `"electricity"`, `"food"`, or `"waste"`
    pub category: String,
    /// Type key within the category (e.g. `"petrol_car"`, `"india_kwh"`)
    #[serde(rename = "type")]
    pub kind: String,
    /// kg CO2 per unit of usage (or per day for food)
    pub factor: f64,
}

/// Loads and parses the factor table file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read, the TOML syntax is
/// invalid, or required fields are missing.
pub fn load_factor_file<P: AsRef<Path>>(path: P) -> Result<FactorFile> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read factor table {}: {e}", path.as_ref().display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse factor table: {e}"),
    })
}

/// Loads the factor table file and validates it into a lookup table.
///
/// # Errors
/// Returns `Error::Config` on read/parse failures and on semantic problems:
/// unknown category names, non-finite or negative factors, or duplicate
/// (category, type) pairs.
pub fn load_factor_table<P: AsRef<Path>>(path: P) -> Result<FactorTable> {
    let file = load_factor_file(path)?;
    FactorTable::from_rows(file.factors)
}
