//! Product form commands.

use catalog_admin::{AppError, Catalog};
use catalog_core::ProductForm;

use crate::terminal::TerminalUi;

/// Add a product.
pub async fn add(
    catalog: &mut Catalog<TerminalUi>,
    name: String,
    price: String,
    category: String,
) -> Result<(), AppError> {
    catalog.product_form = ProductForm {
        id: String::new(),
        name,
        price,
        category,
    };
    let product = catalog.submit_product().await?;
    tracing::info!(id = ?product.id, "Product saved");
    Ok(())
}

/// Patch a product selected by id, else by name.
pub async fn update(
    catalog: &mut Catalog<TerminalUi>,
    id: String,
    fields: ProductForm,
) -> Result<(), AppError> {
    catalog.product_form = ProductForm { id, ..fields };
    catalog.update_product().await?;
    Ok(())
}

/// Delete a product by id, after confirmation.
pub async fn delete(catalog: &mut Catalog<TerminalUi>, id: String) -> Result<(), AppError> {
    catalog.product_form = ProductForm {
        id,
        ..ProductForm::default()
    };
    catalog.delete_product().await?;
    Ok(())
}
