//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! CATALOG_DATABASE_URL=sqlite://catalog.db catalog migrate
//! ```
//!
//! Opening the store creates the database file when it is missing and
//! applies any pending migrations from `crates/admin/migrations/`.

use catalog_admin::{CatalogConfig, Store};

use super::CliError;

/// Open the configured database and report its schema version.
pub async fn run() -> Result<(), CliError> {
    let config = CatalogConfig::from_env()?;

    tracing::info!("Opening catalog database...");
    let store = Store::open(&config).await?;
    let version = store.schema_version().await?;
    store.close().await;

    #[allow(clippy::print_stdout)]
    {
        match version {
            Some(version) => println!("Schema version: {version}"),
            None => println!("No migrations applied"),
        }
    }
    Ok(())
}
