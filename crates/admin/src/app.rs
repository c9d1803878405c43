//! Application root.
//!
//! [`Catalog`] owns the store handle, both forms and the current view.
//! Every handler reports its outcome through [`Interaction::notify`]; on
//! failure the error is logged, shown to the user and returned.

use tracing::{debug, info, warn};

use catalog_core::{Category, CategoryForm, CategoryId, Lookup, Product, ProductForm, ProductId};

use crate::actions::Action;
use crate::db::Store;
use crate::error::AppError;
use crate::interaction::Interaction;
use crate::services::{CategoryManager, ProductManager};
use crate::views::{self, CatalogView};

/// The catalog manager wired to a store and a user interface.
pub struct Catalog<U> {
    store: Store,
    ui: U,
    /// Raw category form inputs.
    pub category_form: CategoryForm,
    /// Raw product form inputs.
    pub product_form: ProductForm,
    view: CatalogView,
}

impl<U: Interaction> Catalog<U> {
    /// Wire a catalog without reading the store.
    pub fn new(store: Store, ui: U) -> Self {
        Self {
            store,
            ui,
            category_form: CategoryForm::default(),
            product_form: ProductForm::default(),
            view: CatalogView::default(),
        }
    }

    /// Wire a catalog and render its initial view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the initial refresh fails.
    pub async fn start(store: Store, ui: U) -> Result<Self, AppError> {
        let mut catalog = Self::new(store, ui);
        catalog.refresh_all().await?;
        Ok(catalog)
    }

    pub const fn store(&self) -> &Store {
        &self.store
    }

    pub const fn ui(&self) -> &U {
        &self.ui
    }

    /// The view as of the last refresh.
    pub const fn view(&self) -> &CatalogView {
        &self.view
    }

    pub const fn categories(&self) -> CategoryManager<'_> {
        CategoryManager::new(&self.store)
    }

    pub const fn products(&self) -> ProductManager<'_> {
        ProductManager::new(&self.store)
    }

    /// Re-read both collections and rebuild the view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if a read fails.
    pub async fn refresh_all(&mut self) -> Result<(), AppError> {
        let result = views::refresh_all(&self.store).await;
        self.view = self.report(result)?;
        Ok(())
    }

    // =========================================================================
    // Category form triggers
    // =========================================================================

    /// Create a category from the category form.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn submit_category(&mut self) -> Result<Category, AppError> {
        let result = self.categories().create(&self.category_form).await;
        let category = self.report(result)?;
        self.category_form.clear();
        self.refresh_all().await?;
        self.ui.notify("Category added.");
        Ok(category)
    }

    /// Update the category the form points at.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn update_category(&mut self) -> Result<Category, AppError> {
        let result = self.categories().update(&self.category_form).await;
        let category = self.report(result)?;
        self.category_form.clear();
        self.refresh_all().await?;
        self.ui.notify("Category updated.");
        Ok(category)
    }

    /// Delete the category the form points at, with its products.
    ///
    /// Returns `false` when the user declined.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn delete_category(&mut self) -> Result<bool, AppError> {
        let target = self.category_form.target().map_err(AppError::from);
        let target = self.report(target)?;
        let deleted = self.delete_category_by(&target).await?;
        if deleted {
            self.category_form.clear();
        }
        Ok(deleted)
    }

    async fn delete_category_by(
        &mut self,
        target: &Lookup<CategoryId>,
    ) -> Result<bool, AppError> {
        let result = self.categories().delete(target, &self.ui).await;
        let Some(report) = self.report(result)? else {
            return Ok(false);
        };
        self.refresh_all().await?;
        self.ui.notify(&format!(
            "Category and {} product(s) deleted.",
            report.products_removed
        ));
        Ok(true)
    }

    // =========================================================================
    // Product form triggers
    // =========================================================================

    /// Create a product from the product form.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn submit_product(&mut self) -> Result<Product, AppError> {
        let result = self.products().create(&self.product_form).await;
        let product = self.report(result)?;
        self.product_form.clear();
        self.refresh_all().await?;
        self.ui.notify("Product added.");
        Ok(product)
    }

    /// Patch the product the form points at with the form's non-blank fields.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn update_product(&mut self) -> Result<Product, AppError> {
        let result = self.update_product_from_form(None).await;
        let product = self.report(result)?;
        self.product_form.clear();
        self.refresh_all().await?;
        self.ui.notify("Product updated.");
        Ok(product)
    }

    /// Delete the product whose id is in the form.
    ///
    /// Returns `false` when the user declined.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn delete_product(&mut self) -> Result<bool, AppError> {
        let id = self.product_form.require_id().map_err(AppError::from);
        let id = self.report(id)?;
        let deleted = self.delete_product_by(id).await?;
        if deleted {
            self.product_form.clear();
        }
        Ok(deleted)
    }

    async fn delete_product_by(&mut self, id: ProductId) -> Result<bool, AppError> {
        let result = self.products().delete(id, &self.ui).await;
        if !self.report(result)? {
            return Ok(false);
        }
        self.refresh_all().await?;
        self.ui.notify("Product deleted.");
        Ok(true)
    }

    async fn update_product_from_form(
        &self,
        id: Option<ProductId>,
    ) -> Result<Product, AppError> {
        let patch = self.product_form.patch()?;
        let target = match id {
            Some(id) => Lookup::Id(id),
            None => self.product_form.target()?,
        };
        self.products().update(&target, patch).await
    }

    // =========================================================================
    // Inline triggers
    // =========================================================================

    /// Run an inline action from the dispatch table.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), AppError> {
        if action.is_destructive() {
            info!(%action, "Dispatching destructive action");
        } else {
            debug!(%action, "Dispatching action");
        }
        match action {
            Action::EditCategory(id) => {
                let result = self.store.get_by_id(id).await.map_err(AppError::from);
                if let Some(category) = self.report(result)? {
                    self.category_form.fill(&category);
                }
            }
            Action::DeleteCategory(id) => {
                self.delete_category_by(&Lookup::Id(id)).await?;
            }
            Action::EditProduct(id) => {
                let result = self.store.get_by_id(id).await.map_err(AppError::from);
                if let Some(product) = self.report(result)? {
                    self.product_form.fill(&product);
                }
            }
            Action::UpdateProduct(id) => {
                let result = self.update_product_from_form(Some(id)).await;
                self.report(result)?;
                self.refresh_all().await?;
                self.ui.notify("Product updated.");
            }
            Action::DeleteProduct(id) => {
                self.delete_product_by(id).await?;
            }
        }
        Ok(())
    }

    /// Decode a rendered trigger's `data-action`/`data-id` pair and run it.
    ///
    /// # Errors
    ///
    /// Returns the error already shown to the user.
    pub async fn dispatch_named(&mut self, name: &str, id: &str) -> Result<(), AppError> {
        let action = Action::parse(name, id).map_err(AppError::from);
        let action = self.report(action)?;
        self.dispatch(action).await
    }

    /// Log and show a failed step; pass successes through.
    fn report<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(e) = &result {
            warn!(error = %e, "Catalog operation failed");
            self.ui.notify(&e.user_message());
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        refuse: bool,
        messages: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Interaction for Recorder {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_owned());
        }

        fn confirm(&self, _message: &str) -> bool {
            !self.refuse
        }
    }

    async fn catalog() -> Catalog<Recorder> {
        let store = Store::in_memory().await.unwrap();
        Catalog::start(store, Recorder::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_submit_category_clears_and_refreshes() {
        let mut catalog = catalog().await;
        catalog.category_form.name = "Drinks".to_owned();
        catalog.category_form.description = "Beverages".to_owned();

        catalog.submit_category().await.unwrap();

        assert_eq!(catalog.category_form, CategoryForm::default());
        assert_eq!(catalog.view().category_options.len(), 2);
        assert_eq!(catalog.ui().messages(), ["Category added."]);
    }

    #[tokio::test]
    async fn test_failure_is_notified_and_form_kept() {
        let mut catalog = catalog().await;
        catalog.product_form.name = "Cola".to_owned();
        catalog.product_form.price = "cheap".to_owned();

        let err = catalog.submit_product().await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(catalog.product_form.name, "Cola");
        assert_eq!(catalog.ui().messages(), [err.user_message()]);
    }

    #[tokio::test]
    async fn test_edit_actions_fill_forms() {
        let mut catalog = catalog().await;
        catalog.category_form.name = "Drinks".to_owned();
        catalog.submit_category().await.unwrap();
        catalog.product_form.name = "Cola".to_owned();
        catalog.product_form.price = "2.5".to_owned();
        catalog.product_form.category = "1".to_owned();
        catalog.submit_product().await.unwrap();

        catalog
            .dispatch(Action::EditCategory(CategoryId::new(1)))
            .await
            .unwrap();
        assert_eq!(catalog.category_form.id, "1");
        assert_eq!(catalog.category_form.name, "Drinks");

        catalog.dispatch_named("product.edit", "1").await.unwrap();
        assert_eq!(catalog.product_form.id, "1");
        assert_eq!(catalog.product_form.price, "2.5");
        assert_eq!(catalog.product_form.category, "1");
    }

    #[tokio::test]
    async fn test_edit_missing_record_does_nothing() {
        let mut catalog = catalog().await;
        catalog
            .dispatch(Action::EditProduct(ProductId::new(3)))
            .await
            .unwrap();
        assert_eq!(catalog.product_form, ProductForm::default());
        assert!(catalog.ui().messages().is_empty());
    }

    #[tokio::test]
    async fn test_row_update_keeps_form() {
        let mut catalog = catalog().await;
        catalog.product_form.name = "Cola".to_owned();
        catalog.product_form.price = "2.5".to_owned();
        catalog.submit_product().await.unwrap();

        catalog.product_form.price = "3".to_owned();
        catalog
            .dispatch(Action::UpdateProduct(ProductId::new(1)))
            .await
            .unwrap();

        assert_eq!(catalog.product_form.price, "3");
        let row = catalog.view().product_rows.first().unwrap();
        assert_eq!(row.cells(), ["Cola", "3", views::NO_CATEGORY_LABEL]);
    }

    #[tokio::test]
    async fn test_declined_delete_is_silent() {
        let store = Store::in_memory().await.unwrap();
        let ui = Recorder {
            refuse: true,
            ..Recorder::default()
        };
        let mut catalog = Catalog::start(store, ui).await.unwrap();
        catalog.category_form.name = "Drinks".to_owned();
        catalog.submit_category().await.unwrap();

        catalog.category_form.name = "Drinks".to_owned();
        assert!(!catalog.delete_category().await.unwrap());
        assert_eq!(catalog.category_form.name, "Drinks");
        assert_eq!(catalog.ui().messages(), ["Category added."]);
    }

    #[tokio::test]
    async fn test_unknown_action_is_reported() {
        let mut catalog = catalog().await;
        let err = catalog.dispatch_named("product.rename", "1").await.unwrap_err();
        assert!(matches!(err, AppError::Action(_)));
        assert_eq!(catalog.ui().messages().len(), 1);
    }
}
