//! Dispatch table for inline record actions.
//!
//! Rendered triggers carry a `data-action` name and a `data-id`; the host
//! page hands both back to [`Action::parse`] and then to
//! [`Catalog::dispatch`](crate::app::Catalog::dispatch).

use core::fmt;

use thiserror::Error;

use catalog_core::{CategoryId, ProductId};

/// Errors that can occur when decoding a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("invalid record id {0:?}")]
    InvalidId(String),
}

/// An inline action bound to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Load a category into the category form.
    EditCategory(CategoryId),
    /// Delete a category and its products, after confirmation.
    DeleteCategory(CategoryId),
    /// Load a product into the product form.
    EditProduct(ProductId),
    /// Patch a product with the current product form.
    UpdateProduct(ProductId),
    /// Delete a product, after confirmation.
    DeleteProduct(ProductId),
}

impl Action {
    /// Every action name the table understands.
    pub const NAMES: [&'static str; 5] = [
        "category.edit",
        "category.delete",
        "product.edit",
        "product.update",
        "product.delete",
    ];

    /// The name rendered into `data-action`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EditCategory(_) => "category.edit",
            Self::DeleteCategory(_) => "category.delete",
            Self::EditProduct(_) => "product.edit",
            Self::UpdateProduct(_) => "product.update",
            Self::DeleteProduct(_) => "product.delete",
        }
    }

    /// The record id rendered into `data-id`.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::EditCategory(id) | Self::DeleteCategory(id) => id.as_i64(),
            Self::EditProduct(id) | Self::UpdateProduct(id) | Self::DeleteProduct(id) => {
                id.as_i64()
            }
        }
    }

    /// Decode a trigger's action name and record id.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::UnknownAction` for a name outside [`Self::NAMES`]
    /// and `ActionError::InvalidId` unless the id is a positive integer.
    pub fn parse(name: &str, id: &str) -> Result<Self, ActionError> {
        let raw_id = id.trim();
        let id = raw_id
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ActionError::InvalidId(raw_id.to_owned()))?;

        match name.trim() {
            "category.edit" => Ok(Self::EditCategory(CategoryId::new(id))),
            "category.delete" => Ok(Self::DeleteCategory(CategoryId::new(id))),
            "product.edit" => Ok(Self::EditProduct(ProductId::new(id))),
            "product.update" => Ok(Self::UpdateProduct(ProductId::new(id))),
            "product.delete" => Ok(Self::DeleteProduct(ProductId::new(id))),
            other => Err(ActionError::UnknownAction(other.to_owned())),
        }
    }

    /// Whether the action deletes records.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::DeleteCategory(_) | Self::DeleteProduct(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name(), self.id())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses_back() {
        for name in Action::NAMES {
            let action = Action::parse(name, "3").unwrap();
            assert_eq!(action.name(), name);
            assert_eq!(action.id(), 3);
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        assert_eq!(
            Action::parse("product.explode", "1"),
            Err(ActionError::UnknownAction("product.explode".to_owned()))
        );
    }

    #[test]
    fn test_parse_bad_ids() {
        for id in ["", "0", "-1", "one"] {
            assert!(
                matches!(Action::parse("product.delete", id), Err(ActionError::InvalidId(_))),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_destructive() {
        assert!(Action::DeleteCategory(CategoryId::new(1)).is_destructive());
        assert!(!Action::UpdateProduct(ProductId::new(1)).is_destructive());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Action::DeleteProduct(ProductId::new(9)).to_string(),
            "product.delete:9"
        );
    }
}
