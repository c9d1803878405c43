//! Render/refresh layer.
//!
//! Every refresh re-reads both collections and rebuilds the category
//! options and the product rows from scratch. HTML goes through askama,
//! which escapes record text.

use askama::Template;
use tracing::{debug, instrument};

use catalog_core::{Category, Product, ProductId};

use crate::actions::Action;
use crate::db::Store;
use crate::error::AppError;

/// Label of a product whose category is unset or no longer exists.
pub const NO_CATEGORY_LABEL: &str = "(no category)";

/// Label of the blank entry at the top of the category selection.
pub const NONE_SELECTED_LABEL: &str = "-- Select --";

/// One entry of the category selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Category id, or empty for the "none selected" entry.
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    fn none_selected() -> Self {
        Self {
            value: String::new(),
            label: NONE_SELECTED_LABEL.to_owned(),
        }
    }

    fn from_category(category: &Category) -> Option<Self> {
        category.id.map(|id| Self {
            value: id.to_string(),
            label: category.name.clone(),
        })
    }
}

/// One row of the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    /// Resolved category name, or [`NO_CATEGORY_LABEL`].
    pub category: String,
}

impl ProductRow {
    /// The row's inline update trigger.
    #[must_use]
    pub const fn update_action(&self) -> Action {
        Action::UpdateProduct(self.id)
    }

    /// The row's inline delete trigger.
    #[must_use]
    pub const fn delete_action(&self) -> Action {
        Action::DeleteProduct(self.id)
    }

    /// Text cells in column order: name, price, category.
    #[must_use]
    pub fn cells(&self) -> [&str; 3] {
        [&self.name, &self.price, &self.category]
    }
}

/// The rendered state of the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub category_options: Vec<CategoryOption>,
    pub product_rows: Vec<ProductRow>,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template)]
#[template(path = "catalog/_category_options.html")]
struct CategoryOptionsTemplate<'a> {
    options: &'a [CategoryOption],
}

#[derive(Template)]
#[template(path = "catalog/_product_rows.html")]
struct ProductRowsTemplate<'a> {
    rows: &'a [ProductRow],
}

#[derive(Template)]
#[template(path = "catalog/index.html")]
struct CatalogPageTemplate<'a> {
    options: &'a [CategoryOption],
    rows: &'a [ProductRow],
}

impl CatalogView {
    /// The `<option>` list for the category selection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn render_category_options(&self) -> Result<String, AppError> {
        Ok(CategoryOptionsTemplate {
            options: &self.category_options,
        }
        .render()?)
    }

    /// The `<tr>` rows of the product table body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn render_product_rows(&self) -> Result<String, AppError> {
        Ok(ProductRowsTemplate {
            rows: &self.product_rows,
        }
        .render()?)
    }

    /// A standalone page with both forms, the options and the table.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn render_page(&self) -> Result<String, AppError> {
        Ok(CatalogPageTemplate {
            options: &self.category_options,
            rows: &self.product_rows,
        }
        .render()?)
    }
}

// =============================================================================
// Refresh
// =============================================================================

/// Rebuild the category selection list.
///
/// # Errors
///
/// Returns `AppError::Store` if the categories cannot be read.
#[instrument(skip(store))]
pub async fn refresh_categories(store: &Store) -> Result<Vec<CategoryOption>, AppError> {
    let categories = store.get_all::<Category>().await?;
    debug!(count = categories.len(), "Rebuilding category options");

    let mut options = Vec::with_capacity(categories.len() + 1);
    options.push(CategoryOption::none_selected());
    options.extend(categories.iter().filter_map(CategoryOption::from_category));
    Ok(options)
}

/// Rebuild the product table, resolving each row's category by id.
///
/// # Errors
///
/// Returns `AppError::Store` if a read fails.
#[instrument(skip(store))]
pub async fn refresh_products(store: &Store) -> Result<Vec<ProductRow>, AppError> {
    let products = store.get_all::<Product>().await?;
    debug!(count = products.len(), "Rebuilding product rows");

    let mut rows = Vec::with_capacity(products.len());
    for product in products {
        let Some(id) = product.id else {
            continue;
        };
        let category = match product.category_id {
            Some(category_id) => match store.get_by_id(category_id).await? {
                Some(category) => category.name,
                None => {
                    debug!(product = %id, category = %category_id, "Dangling category reference");
                    NO_CATEGORY_LABEL.to_owned()
                }
            },
            None => NO_CATEGORY_LABEL.to_owned(),
        };
        rows.push(ProductRow {
            id,
            name: product.name,
            price: product.price.to_string(),
            category,
        });
    }
    Ok(rows)
}

/// Categories first, then products.
///
/// # Errors
///
/// Returns `AppError::Store` if a read fails.
pub async fn refresh_all(store: &Store) -> Result<CatalogView, AppError> {
    let category_options = refresh_categories(store).await?;
    let product_rows = refresh_products(store).await?;
    Ok(CatalogView {
        category_options,
        product_rows,
    })
}
