//! Unified error handling for the catalog.

use std::fmt::Display;

use thiserror::Error;

use catalog_core::FormError;

use crate::actions::ActionError;
use crate::db::StoreError;

/// Application-level error type for catalog operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Form input was rejected.
    #[error("Invalid input: {0}")]
    Validation(#[from] FormError),

    /// No record matched the id or name.
    #[error("Not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    /// The name fallback matched more than one record.
    #[error("Ambiguous name: {count} {entity} records are named \"{name}\"")]
    AmbiguousName {
        entity: &'static str,
        name: String,
        count: usize,
    },

    /// An inline trigger named an unknown action or a bad id.
    #[error("Invalid action: {0}")]
    Action(#[from] ActionError),

    /// A view failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Build a `NotFound` error for a record looked up by `key`.
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Plain-language text shown to the user when an operation is aborted.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(StoreError::Initialization(_)) => {
                "The catalog storage is unavailable.".to_string()
            }
            Self::Store(e) if e.is_constraint_violation() => {
                "Could not save: a record with that id already exists.".to_string()
            }
            Self::Store(e) if e.is_write_error() => "Could not save the changes.".to_string(),
            Self::Store(_) => "Could not read the catalog.".to_string(),
            Self::Validation(e) => format!("Check the form: {e}."),
            Self::NotFound { entity, key } => format!("No {entity} found for {key}."),
            Self::AmbiguousName {
                entity,
                name,
                count,
            } => format!("{count} {entity} records are named \"{name}\". Select one by id."),
            Self::Action(e) => format!("That action is not available: {e}."),
            Self::Render(_) => "The catalog view could not be displayed.".to_string(),
        }
    }
}
