//! Command implementations.

pub mod action;
pub mod category;
pub mod list;
pub mod migrate;
pub mod product;
pub mod render;

use catalog_admin::{AppError, Catalog, CatalogConfig, ConfigError, Store, StoreError};
use thiserror::Error;

use crate::terminal::TerminalUi;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the configured store and render the initial view.
pub async fn open_catalog(assume_yes: bool) -> Result<Catalog<TerminalUi>, CliError> {
    let config = CatalogConfig::from_env()?;
    let store = Store::open(&config).await?;
    Ok(Catalog::start(store, TerminalUi::new(assume_yes)).await?)
}
