//! Category form commands.

use catalog_admin::{AppError, Catalog};
use catalog_core::CategoryForm;

use crate::terminal::TerminalUi;

/// Add a category.
pub async fn add(
    catalog: &mut Catalog<TerminalUi>,
    name: String,
    description: String,
) -> Result<(), AppError> {
    catalog.category_form = CategoryForm {
        id: String::new(),
        name,
        description,
    };
    let category = catalog.submit_category().await?;
    tracing::info!(id = ?category.id, "Category saved");
    Ok(())
}

/// Update a category selected by id, else by name.
pub async fn update(
    catalog: &mut Catalog<TerminalUi>,
    id: String,
    name: String,
    description: String,
) -> Result<(), AppError> {
    catalog.category_form = CategoryForm {
        id,
        name,
        description,
    };
    catalog.update_category().await?;
    Ok(())
}

/// Delete a category and its products, after confirmation.
pub async fn delete(
    catalog: &mut Catalog<TerminalUi>,
    id: String,
    name: String,
) -> Result<(), AppError> {
    catalog.category_form = CategoryForm {
        id,
        name,
        description: String::new(),
    };
    catalog.delete_category().await?;
    Ok(())
}
