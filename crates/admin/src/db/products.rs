//! Product collection.

use catalog_core::{CategoryId, Product, ProductId};

use super::{Collection, DocumentRow, Record, RecordId, Store, StoreError};

impl Record for Product {
    type Id = ProductId;

    const COLLECTION: Collection = Collection::Products;

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn set_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category_key(&self) -> Option<CategoryId> {
        self.category_id
    }
}

impl RecordId for ProductId {
    type Record = Product;
}

impl Store {
    /// Every product filed under `category_id`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the read fails and
    /// `StoreError::DataCorruption` if a stored record cannot be decoded.
    pub async fn products_in_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, record FROM productos WHERE category_id = ?1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(self.pool())
        .await
        .map_err(|source| StoreError::Query {
            collection: Collection::Products.table(),
            source,
        })?;

        rows.into_iter().map(DocumentRow::decode).collect()
    }
}
