//! Interactive command loop - the thin text interface over the engine.
//!
//! The presentation layer proper (charts, forms) is an external concern;
//! this module only exposes every engine operation as a line command so the
//! whole flow is reachable end-to-end from a terminal. The authenticated
//! user is threaded explicitly through each command, never held as ambient
//! global state.

/// Command handlers over the shared [`AppData`] context
pub mod commands;

use crate::{
    core::footprint::FactorTable,
    entities::user,
    errors::Result,
    ml::EmissionModel,
};
use sea_orm::DatabaseConnection;
use std::io::{BufRead, Write};
use tracing::info;

/// Shared data available to all commands: the database handle, the
/// read-only factor table, and an optional external emission classifier.
pub struct AppData {
    /// Database connection for all persistence operations
    pub database: DatabaseConnection,
    /// Emission factor table, loaded once at startup
    pub factors: FactorTable,
    /// External vehicle emission classifier, when one is configured
    pub model: Option<Box<dyn EmissionModel + Send + Sync>>,
}

impl AppData {
    /// Creates the shared context without an external classifier.
    #[must_use]
    pub fn new(database: DatabaseConnection, factors: FactorTable) -> Self {
        Self {
            database,
            factors,
            model: None,
        }
    }

    /// Attaches an external emission classifier.
    #[must_use]
    pub fn with_model(mut self, model: Box<dyn EmissionModel + Send + Sync>) -> Self {
        self.model = Some(model);
        self
    }
}

/// Runs the interactive loop until `quit` or end of input.
///
/// Per-request errors are printed and the loop continues; only I/O failure
/// on stdin ends the session abnormally.
pub async fn run(data: AppData) -> Result<()> {
    let stdin = std::io::stdin();
    let mut session: Option<user::Model> = None;

    println!("carbon-buddy - type 'help' for commands");
    info!("Command loop started");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // end of input
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match commands::dispatch(&data, &mut session, line).await {
            Ok(output) => println!("{output}"),
            Err(e) => println!("Error: {e}"),
        }
    }

    info!("Command loop finished");
    Ok(())
}
