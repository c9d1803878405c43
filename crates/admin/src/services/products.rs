//! Product manager.

use tracing::{debug, info, instrument, warn};

use catalog_core::{Lookup, Product, ProductForm, ProductId, ProductPatch};

use super::single_match;
use crate::db::Store;
use crate::error::AppError;
use crate::interaction::Interaction;

/// Confirmation asked before a product is deleted.
pub const DELETE_PRODUCT_PROMPT: &str = "Delete product?";

/// Product operations over a [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct ProductManager<'a> {
    store: &'a Store,
}

impl<'a> ProductManager<'a> {
    /// Create a new manager.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Add the product described by the form.
    ///
    /// A category id with no matching category is stored as given.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank name or a bad price or
    /// category, and `AppError::Store` if a read or write fails.
    #[instrument(skip(self, form), fields(name = %form.name.trim()))]
    pub async fn create(&self, form: &ProductForm) -> Result<Product, AppError> {
        let draft = form.draft()?;
        if let Some(category_id) = draft.category_id
            && self.store.get_by_id(category_id).await?.is_none()
        {
            warn!(category = %category_id, "Product references a missing category");
        }

        let id = self.store.add(&draft).await?;
        info!(%id, "Product created");
        Ok(draft.with_id(id))
    }

    /// Find the product a form or trigger points at.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when nothing matches and
    /// `AppError::AmbiguousName` when a name matches several products.
    pub async fn resolve(&self, target: &Lookup<ProductId>) -> Result<Product, AppError> {
        match target {
            Lookup::Id(id) => self
                .store
                .get_by_id(*id)
                .await?
                .ok_or_else(|| AppError::not_found("product", id)),
            Lookup::Name(name) => {
                let matches = self.store.find_by_name::<Product>(name).await?;
                single_match(matches, "product", name)
            }
        }
    }

    /// Apply a partial update to the targeted product.
    ///
    /// Fields left out of the patch keep their stored values. An empty patch
    /// writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound`/`AppError::AmbiguousName` from resolution
    /// and `AppError::Store` if the write fails.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        target: &Lookup<ProductId>,
        patch: ProductPatch,
    ) -> Result<Product, AppError> {
        let mut product = self.resolve(target).await?;
        if patch.is_empty() {
            debug!(id = ?product.id, "Nothing to change");
            return Ok(product);
        }
        if let Some(Some(category_id)) = patch.category
            && self.store.get_by_id(category_id).await?.is_none()
        {
            warn!(category = %category_id, "Product moved to a missing category");
        }

        patch.apply(&mut product);
        let id = self.store.put(&product).await?;
        info!(%id, "Product updated");
        Ok(product)
    }

    /// Delete a product by id, once confirmed. No cascade.
    ///
    /// Returns `false` when the user declines. Deleting an absent id is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the delete fails.
    #[instrument(skip(self, ui))]
    pub async fn delete(&self, id: ProductId, ui: &dyn Interaction) -> Result<bool, AppError> {
        if !ui.confirm(DELETE_PRODUCT_PROMPT) {
            info!(%id, "Product deletion cancelled");
            return Ok(false);
        }

        self.store.delete(id).await?;
        info!(%id, "Product deleted");
        Ok(true)
    }
}
