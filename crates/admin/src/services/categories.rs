//! Category manager.

use tracing::{info, instrument};

use catalog_core::{Category, CategoryForm, CategoryId, Lookup};

use super::single_match;
use crate::db::{CascadeReport, Store};
use crate::error::AppError;
use crate::interaction::Interaction;

/// Category operations over a [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct CategoryManager<'a> {
    store: &'a Store,
}

impl<'a> CategoryManager<'a> {
    /// Create a new manager.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Add the category described by the form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank name and `AppError::Store`
    /// if the write fails.
    #[instrument(skip(self, form), fields(name = %form.name.trim()))]
    pub async fn create(&self, form: &CategoryForm) -> Result<Category, AppError> {
        let draft = form.draft()?;
        let id = self.store.add(&draft).await?;
        info!(%id, "Category created");
        Ok(draft.with_id(id))
    }

    /// Find the category a form points at.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when nothing matches and
    /// `AppError::AmbiguousName` when a name matches several categories.
    pub async fn resolve(&self, target: &Lookup<CategoryId>) -> Result<Category, AppError> {
        match target {
            Lookup::Id(id) => self
                .store
                .get_by_id(*id)
                .await?
                .ok_or_else(|| AppError::not_found("category", id)),
            Lookup::Name(name) => {
                let matches = self.store.find_by_name::<Category>(name).await?;
                single_match(matches, "category", name)
            }
        }
    }

    /// Overwrite the name and description of the category the form points at.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank name or missing target,
    /// `AppError::NotFound`/`AppError::AmbiguousName` from resolution and
    /// `AppError::Store` if the write fails.
    #[instrument(skip(self, form), fields(id = %form.id.trim(), name = %form.name.trim()))]
    pub async fn update(&self, form: &CategoryForm) -> Result<Category, AppError> {
        let changes = form.changes()?;
        let mut category = self.resolve(&form.target()?).await?;
        changes.apply(&mut category);
        let id = self.store.put(&category).await?;
        info!(%id, "Category updated");
        Ok(category)
    }

    /// Delete a category and every product filed under it, once confirmed.
    ///
    /// Returns `None` when the user declines.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound`/`AppError::AmbiguousName` from resolution
    /// and `AppError::Store` if the cascade fails.
    #[instrument(skip(self, ui))]
    pub async fn delete(
        &self,
        target: &Lookup<CategoryId>,
        ui: &dyn Interaction,
    ) -> Result<Option<CascadeReport>, AppError> {
        let category = self.resolve(target).await?;
        let id = category
            .id
            .ok_or_else(|| AppError::not_found("category", &category.name))?;
        let dependents = self.store.products_in_category(id).await?.len();

        let prompt = format!(
            "Delete category \"{}\" and its {dependents} product(s)?",
            category.name
        );
        if !ui.confirm(&prompt) {
            info!(%id, "Category deletion cancelled");
            return Ok(None);
        }

        let report = self.store.delete_category_cascade(id).await?;
        Ok(Some(report))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use catalog_core::{Price, Product};

    use super::*;

    struct Scripted {
        answer: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl Interaction for Scripted {
        fn notify(&self, _message: &str) {}

        fn confirm(&self, message: &str) -> bool {
            self.prompts.lock().unwrap().push(message.to_owned());
            self.answer
        }
    }

    fn form(id: &str, name: &str, description: &str) -> CategoryForm {
        CategoryForm {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_create_trims() {
        let store = Store::in_memory().await.unwrap();
        let manager = CategoryManager::new(&store);

        let created = manager
            .create(&form("", "  Drinks ", " Beverages  "))
            .await
            .unwrap();
        assert_eq!(created.id, Some(CategoryId::new(1)));
        assert_eq!(created.name, "Drinks");
        assert_eq!(created.description, "Beverages");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let store = Store::in_memory().await.unwrap();
        let err = CategoryManager::new(&store)
            .create(&form("", "   ", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.get_all::<Category>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_name_fallback() {
        let store = Store::in_memory().await.unwrap();
        let manager = CategoryManager::new(&store);
        manager.create(&form("", "Drinks", "old")).await.unwrap();

        let updated = manager.update(&form("", "drinks", "new")).await.unwrap();
        assert_eq!(updated.id, Some(CategoryId::new(1)));

        let stored = store.get_by_id(CategoryId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.name, "drinks");
        assert_eq!(stored.description, "new");
    }

    #[tokio::test]
    async fn test_update_missing_and_ambiguous() {
        let store = Store::in_memory().await.unwrap();
        let manager = CategoryManager::new(&store);

        let err = manager.update(&form("5", "Snacks", "")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        manager.create(&form("", "Snacks", "a")).await.unwrap();
        manager.create(&form("", "SNACKS", "b")).await.unwrap();
        let err = manager.update(&form("", "snacks", "c")).await.unwrap_err();
        assert!(matches!(err, AppError::AmbiguousName { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_delete_confirms_and_cascades() {
        let store = Store::in_memory().await.unwrap();
        let manager = CategoryManager::new(&store);
        let drinks = manager.create(&form("", "Drinks", "")).await.unwrap();
        let price = Price::parse("2.5").unwrap();
        store
            .add(&Product::new("Cola", price, drinks.id))
            .await
            .unwrap();

        let ui = Scripted::new(true);
        let report = manager
            .delete(&Lookup::Name("Drinks".to_owned()), &ui)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.products_removed, 1);
        assert!(report.category_removed);
        assert_eq!(
            ui.prompts.lock().unwrap().as_slice(),
            ["Delete category \"Drinks\" and its 1 product(s)?"]
        );
        assert!(store.get_all::<Product>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let store = Store::in_memory().await.unwrap();
        let manager = CategoryManager::new(&store);
        let drinks = manager.create(&form("", "Drinks", "")).await.unwrap();

        let outcome = manager
            .delete(&Lookup::Id(drinks.id.unwrap()), &Scripted::new(false))
            .await
            .unwrap();
        assert!(outcome.is_none());
        assert_eq!(store.get_all::<Category>().await.unwrap().len(), 1);
    }
}
