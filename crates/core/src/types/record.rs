//! Catalog records.
//!
//! Both records carry an optional id: it is `None` until the store assigns
//! one on `add`, and `Some` for everything read back from the store.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Store-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    /// Display label; also the fallback lookup key.
    pub name: String,
    /// Free-form description, possibly empty.
    #[serde(default)]
    pub description: String,
}

impl Category {
    /// Create an unsaved category.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Attach an id.
    #[must_use]
    pub const fn with_id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }
}

/// A product, optionally filed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Display label; also the fallback lookup key.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Weak reference to a category. Nothing guarantees the category exists.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Create an unsaved product.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, category_id: Option<CategoryId>) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            category_id,
        }
    }

    /// Attach an id.
    #[must_use]
    pub const fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_json_shape() {
        let category = Category::new("Drinks", "Beverages").with_id(CategoryId::new(1));
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Drinks", "description": "Beverages"})
        );
    }

    #[test]
    fn test_unsaved_record_omits_id() {
        let category = Category::new("Drinks", "");
        let json = serde_json::to_string(&category).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product::new(
            "Cola",
            Price::parse("2.5").unwrap(),
            Some(CategoryId::new(1)),
        );
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Cola", "price": "2.5", "categoryId": 1})
        );
    }

    #[test]
    fn test_product_without_category_field() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "name": "Soap", "price": "1"}"#).unwrap();
        assert_eq!(product.id, Some(ProductId::new(3)));
        assert_eq!(product.category_id, None);
    }
}
