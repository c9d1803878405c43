//! Category collection and the category cascade.

use tracing::{info, instrument};

use catalog_core::{Category, CategoryId};

use super::{Collection, Record, RecordId, Store, StoreError};

impl Record for Category {
    type Id = CategoryId;

    const COLLECTION: Collection = Collection::Categories;

    fn id(&self) -> Option<CategoryId> {
        self.id
    }

    fn set_id(&mut self, id: CategoryId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl RecordId for CategoryId {
    type Record = Category;
}

/// What a cascading category delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Products that referenced the category.
    pub products_removed: u64,
    /// Whether the category row itself existed.
    pub category_removed: bool,
}

impl Store {
    /// Delete a category together with every product that references it.
    ///
    /// Both deletes run in one transaction: either the category and all of
    /// its products are gone, or nothing changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if either delete or the commit fails.
    #[instrument(skip(self))]
    pub async fn delete_category_cascade(
        &self,
        id: CategoryId,
    ) -> Result<CascadeReport, StoreError> {
        let write_error = |collection: Collection| {
            move |source: sqlx::Error| StoreError::Write {
                collection: collection.table(),
                source,
            }
        };

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(write_error(Collection::Categories))?;

        let products = sqlx::query("DELETE FROM productos WHERE category_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(write_error(Collection::Products))?;

        let category = sqlx::query("DELETE FROM categorias WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(write_error(Collection::Categories))?;

        tx.commit()
            .await
            .map_err(write_error(Collection::Categories))?;

        let report = CascadeReport {
            products_removed: products.rows_affected(),
            category_removed: category.rows_affected() > 0,
        };
        info!(
            category_id = %id,
            products_removed = report.products_removed,
            "Deleted category with its products"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catalog_core::{Price, Product};

    use super::*;

    async fn product_in(store: &Store, name: &str, category: Option<CategoryId>) {
        store
            .add(&Product::new(name, Price::parse("1").unwrap(), category))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cascade_scope() {
        let store = Store::in_memory().await.unwrap();
        let drinks = store.add(&Category::new("Drinks", "")).await.unwrap();
        let snacks = store.add(&Category::new("Snacks", "")).await.unwrap();
        product_in(&store, "Cola", Some(drinks)).await;
        product_in(&store, "Water", Some(drinks)).await;
        product_in(&store, "Chips", Some(snacks)).await;
        product_in(&store, "Loose", None).await;

        let report = store.delete_category_cascade(drinks).await.unwrap();
        assert_eq!(
            report,
            CascadeReport {
                products_removed: 2,
                category_removed: true,
            }
        );

        let names: Vec<String> = store
            .get_all::<Product>()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Chips", "Loose"]);
        assert_eq!(store.get_by_id(drinks).await.unwrap(), None);
        assert!(store.get_by_id(snacks).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cascade_on_missing_category() {
        let store = Store::in_memory().await.unwrap();
        product_in(&store, "Orphan", Some(CategoryId::new(7))).await;

        let report = store
            .delete_category_cascade(CategoryId::new(7))
            .await
            .unwrap();
        assert_eq!(report.products_removed, 1);
        assert!(!report.category_removed);
    }
}
