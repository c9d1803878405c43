//! Catalog manager library.
//!
//! Storage gateway, category and product managers, the render layer and
//! the dispatch table behind the `catalog` front-end.
//!
//! ```no_run
//! use catalog_admin::{Catalog, Interaction, Store};
//!
//! struct Silent;
//!
//! impl Interaction for Silent {
//!     fn notify(&self, _message: &str) {}
//!     fn confirm(&self, _message: &str) -> bool {
//!         true
//!     }
//! }
//!
//! # async fn demo() -> Result<(), catalog_admin::AppError> {
//! let store = Store::in_memory().await?;
//! let mut catalog = Catalog::start(store, Silent).await?;
//! catalog.category_form.name = "Drinks".to_owned();
//! catalog.submit_category().await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod interaction;
pub mod services;
pub mod views;

pub use actions::{Action, ActionError};
pub use app::Catalog;
pub use config::{CatalogConfig, ConfigError};
pub use db::{CascadeReport, Store, StoreError};
pub use error::AppError;
pub use interaction::Interaction;
