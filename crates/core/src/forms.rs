//! Raw form state and input validation.
//!
//! Forms hold exactly what was typed into the page's inputs. Turning that
//! text into records, patches and lookup targets happens here so every front
//! end applies the same rules.

use crate::types::id::{CategoryId, ProductId, parse_form_id};
use crate::types::price::Price;
use crate::types::record::{Category, Product};

/// Errors that can occur when reading a form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The name field is blank where a name is required.
    #[error("a name is required")]
    MissingName,
    /// Neither an id nor a name was given to pick the record to act on.
    #[error("enter an id or a name to select the record")]
    MissingTarget,
    /// The operation only accepts an id.
    #[error("select a record by id first")]
    MissingId,
    /// The id field is not a positive integer.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// The price field is blank.
    #[error("a price is required")]
    MissingPrice,
    /// The price field is not a decimal number.
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    /// The price is below zero.
    #[error("price cannot be negative")]
    NegativePrice,
    /// The category field is neither blank, `0`, `none` nor a positive id.
    #[error("invalid category: {0}")]
    InvalidCategory(String),
}

/// How an update or delete picks its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<I> {
    /// By primary key.
    Id(I),
    /// By case-insensitive exact name.
    Name(String),
}

fn lookup<I: From<i64>>(raw_id: &str, raw_name: &str) -> Result<Lookup<I>, FormError> {
    if let Some(id) = parse_form_id(raw_id)? {
        return Ok(Lookup::Id(id));
    }
    let name = raw_name.trim();
    if name.is_empty() {
        return Err(FormError::MissingTarget);
    }
    Ok(Lookup::Name(name.to_owned()))
}

// =============================================================================
// Category Form
// =============================================================================

/// The category form: hidden id, name and description inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// New values for an existing category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChanges {
    pub name: String,
    pub description: String,
}

impl CategoryChanges {
    /// Overwrite the name and description of `category`.
    pub fn apply(self, category: &mut Category) {
        category.name = self.name;
        category.description = self.description;
    }
}

impl CategoryForm {
    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Load a stored category into the form for editing.
    pub fn fill(&mut self, category: &Category) {
        self.id = category.id.map(|id| id.to_string()).unwrap_or_default();
        self.name.clone_from(&category.name);
        self.description.clone_from(&category.description);
    }

    /// Build a new, unsaved category from the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingName`] if the name is blank.
    pub fn draft(&self) -> Result<Category, FormError> {
        let changes = self.changes()?;
        Ok(Category::new(changes.name, changes.description))
    }

    /// The trimmed name and description to write over an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingName`] if the name is blank.
    pub fn changes(&self) -> Result<CategoryChanges, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(CategoryChanges {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
        })
    }

    /// Which category the form points at: the id field first, then the name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingTarget`] when both are blank and
    /// [`FormError::InvalidId`] for a malformed id.
    pub fn target(&self) -> Result<Lookup<CategoryId>, FormError> {
        lookup(&self.id, &self.name)
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// The product form: hidden id, name, price and category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub price: String,
    /// Value of the category selection list; blank is "none selected".
    pub category: String,
}

/// A partial update to a product.
///
/// `None` keeps the stored value. For `category`, `Some(None)` clears the
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub category: Option<Option<CategoryId>>,
}

impl ProductPatch {
    /// Whether applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category.is_none()
    }

    /// Write the patched fields into `product`.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category_id = category;
        }
    }
}

fn parse_category_choice(raw: &str) -> Result<Option<CategoryId>, FormError> {
    parse_form_id(raw).map_err(|_| FormError::InvalidCategory(raw.trim().to_owned()))
}

impl ProductForm {
    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Load a stored product into the form for editing.
    pub fn fill(&mut self, product: &Product) {
        self.id = product.id.map(|id| id.to_string()).unwrap_or_default();
        self.name.clone_from(&product.name);
        self.price = product.price.to_string();
        self.category = product
            .category_id
            .map(|id| id.to_string())
            .unwrap_or_default();
    }

    /// Build a new, unsaved product from the form.
    ///
    /// A blank or `0` category means the product has no category.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if the name is blank, the price is missing or
    /// not a non-negative decimal, or the category is malformed.
    pub fn draft(&self) -> Result<Product, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let price = Price::parse(&self.price)?;
        let category_id = parse_category_choice(&self.category)?;
        Ok(Product::new(name, price, category_id))
    }

    /// Read the form as a partial update: blank fields keep stored values.
    ///
    /// The category field accepts `0` or `none` to clear the category.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if a non-blank price or category is malformed.
    pub fn patch(&self) -> Result<ProductPatch, FormError> {
        let name = Some(self.name.trim())
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned);

        let price = if self.price.trim().is_empty() {
            None
        } else {
            Some(Price::parse(&self.price)?)
        };

        let raw_category = self.category.trim();
        let category = if raw_category.is_empty() {
            None
        } else if raw_category.eq_ignore_ascii_case("none") {
            Some(None)
        } else {
            Some(parse_category_choice(raw_category)?)
        };

        Ok(ProductPatch {
            name,
            price,
            category,
        })
    }

    /// Which product the form points at: the id field first, then the name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingTarget`] when both are blank and
    /// [`FormError::InvalidId`] for a malformed id.
    pub fn target(&self) -> Result<Lookup<ProductId>, FormError> {
        lookup(&self.id, &self.name)
    }

    /// The product id, required by operations without a name fallback.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingId`] when the id field is blank and
    /// [`FormError::InvalidId`] when it is malformed.
    pub fn require_id(&self) -> Result<ProductId, FormError> {
        parse_form_id(&self.id)?.ok_or(FormError::MissingId)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn category_form(id: &str, name: &str, description: &str) -> CategoryForm {
        CategoryForm {
            id: id.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }

    fn product_form(id: &str, name: &str, price: &str, category: &str) -> ProductForm {
        ProductForm {
            id: id.to_owned(),
            name: name.to_owned(),
            price: price.to_owned(),
            category: category.to_owned(),
        }
    }

    #[test]
    fn test_category_draft_trims() {
        let draft = category_form("", "  Drinks ", " Beverages  ").draft().unwrap();
        assert_eq!(draft, Category::new("Drinks", "Beverages"));
    }

    #[test]
    fn test_category_draft_requires_name() {
        assert_eq!(
            category_form("", "   ", "x").draft(),
            Err(FormError::MissingName)
        );
    }

    #[test]
    fn test_category_target_prefers_id() {
        let form = category_form("4", "Drinks", "");
        assert_eq!(form.target().unwrap(), Lookup::Id(CategoryId::new(4)));

        let form = category_form("", " Drinks ", "");
        assert_eq!(form.target().unwrap(), Lookup::Name("Drinks".to_owned()));
    }

    #[test]
    fn test_category_target_needs_something() {
        assert_eq!(
            category_form("", "", "desc").target(),
            Err(FormError::MissingTarget)
        );
        assert_eq!(
            category_form("0", " ", "").target(),
            Err(FormError::MissingTarget)
        );
    }

    #[test]
    fn test_category_fill_then_clear() {
        let mut form = CategoryForm::default();
        form.fill(&Category::new("Snacks", "Salty").with_id(CategoryId::new(9)));
        assert_eq!(form, category_form("9", "Snacks", "Salty"));
        form.clear();
        assert_eq!(form, CategoryForm::default());
    }

    #[test]
    fn test_product_draft() {
        let product = product_form("", "Cola", "2.5", "1").draft().unwrap();
        assert_eq!(product.name, "Cola");
        assert_eq!(product.price.to_string(), "2.5");
        assert_eq!(product.category_id, Some(CategoryId::new(1)));
    }

    #[test]
    fn test_product_draft_without_category() {
        assert_eq!(
            product_form("", "Cola", "1", "").draft().unwrap().category_id,
            None
        );
        assert_eq!(
            product_form("", "Cola", "1", "0").draft().unwrap().category_id,
            None
        );
    }

    #[test]
    fn test_product_draft_rejects_bad_numbers() {
        assert!(matches!(
            product_form("", "Cola", "cheap", "").draft(),
            Err(FormError::InvalidPrice(_))
        ));
        assert_eq!(
            product_form("", "Cola", "", "").draft(),
            Err(FormError::MissingPrice)
        );
        assert!(matches!(
            product_form("", "Cola", "1", "drinks").draft(),
            Err(FormError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_product_patch_blank_keeps_everything() {
        let patch = product_form("3", " ", "", "").patch().unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_product_patch_clear_category() {
        assert_eq!(
            product_form("3", "", "", "none").patch().unwrap().category,
            Some(None)
        );
        assert_eq!(
            product_form("3", "", "", "0").patch().unwrap().category,
            Some(None)
        );
        assert_eq!(
            product_form("3", "", "", "2").patch().unwrap().category,
            Some(Some(CategoryId::new(2)))
        );
    }

    #[test]
    fn test_product_patch_apply() {
        let mut product = Product::new("Cola", Price::parse("2").unwrap(), None)
            .with_id(ProductId::new(1));
        product_form("", "", "3.75", "5")
            .patch()
            .unwrap()
            .apply(&mut product);
        assert_eq!(product.name, "Cola");
        assert_eq!(product.price.to_string(), "3.75");
        assert_eq!(product.category_id, Some(CategoryId::new(5)));
    }

    #[test]
    fn test_product_require_id() {
        assert_eq!(
            product_form("", "Cola", "", "").require_id(),
            Err(FormError::MissingId)
        );
        assert_eq!(
            product_form("12", "", "", "").require_id(),
            Ok(ProductId::new(12))
        );
    }

    #[test]
    fn test_product_fill() {
        let mut form = ProductForm::default();
        form.fill(
            &Product::new("Cola", Price::parse("2.5").unwrap(), None).with_id(ProductId::new(2)),
        );
        assert_eq!(form, product_form("2", "Cola", "2.5", ""));
    }
}
