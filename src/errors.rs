//! Unified error types for `CarbonBuddy`.
//!
//! One enum covers the whole taxonomy: fatal configuration problems at
//! startup, per-request validation and factor-lookup failures, identity
//! failures, and collaborator (database, classifier, I/O) errors. Pure
//! computation errors propagate synchronously with `?`; nothing in the core
//! retries or swallows an error into a default value.

use crate::core::footprint::Category;
use thiserror::Error;

/// All errors produced by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup configuration problem: missing/unreadable/malformed factor
    /// table or application settings. Fatal - the process must not accept
    /// calculations.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the configuration problem
        message: String,
    },

    /// A requested (category, type) pair is absent from the factor table.
    /// Rejects the single calculation; never defaults to zero.
    #[error("No emission factor for {category}/{kind}")]
    UnknownFactor {
        /// Emission category that was looked up
        category: Category,
        /// Type key within the category
        kind: String,
    },

    /// An input value is out of its declared range (negative or non-finite).
    #[error("Invalid value for {field}: {value}")]
    InvalidInput {
        /// Name of the offending input field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Registration attempted with a username that already exists.
    #[error("Username '{username}' is already taken")]
    UsernameTaken {
        /// The requested username
        username: String,
    },

    /// Authentication failed: unknown username or wrong password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The external emission classifier is unavailable or failed to predict.
    #[error("Classifier error: {message}")]
    Classifier {
        /// Description of the classifier failure
        message: String,
    },

    /// A command line could not be parsed or used an unknown command.
    #[error("Command error: {message}")]
    Command {
        /// Description of the usage problem
        message: String,
    },

    /// Database error from the persistence store.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (history export, factor table read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error during configuration loading.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
