use carbon_buddy::cli::{self, AppData};
use carbon_buddy::config;
use carbon_buddy::errors::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;
    info!("Successfully processed application configuration.");

    // 4. Load the emission factor table - fatal if missing or malformed,
    //    the process must not accept calculations without it
    let factors = config::factors::load_factor_table(&app_config.factor_table_path)
        .inspect_err(|e| error!("Failed to load emission factor table: {}", e))?;
    info!(count = factors.len(), "Emission factor table loaded.");

    // 5. Initialize database
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 6. Run the command loop. No external classifier is wired in by
    //    default; `AppData::with_model` attaches one when available.
    cli::run(AppData::new(db, factors)).await
}
