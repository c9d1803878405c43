//! Inline action command.
//!
//! Runs one entry of the dispatch table. Edit actions print the form they
//! loaded; `product.update` patches with the given product fields.

use catalog_admin::{AppError, Catalog};
use catalog_core::ProductForm;

use crate::terminal::TerminalUi;

/// Dispatch `name` for record `id`.
pub async fn run(
    catalog: &mut Catalog<TerminalUi>,
    name: &str,
    id: &str,
    fields: ProductForm,
) -> Result<(), AppError> {
    catalog.product_form = fields;
    catalog.dispatch_named(name, id).await?;

    #[allow(clippy::print_stdout)]
    {
        match name.trim() {
            "category.edit" if !catalog.category_form.id.is_empty() => {
                let form = &catalog.category_form;
                println!("id:          {}", form.id);
                println!("name:        {}", form.name);
                println!("description: {}", form.description);
            }
            "product.edit" if !catalog.product_form.id.is_empty() => {
                let form = &catalog.product_form;
                println!("id:       {}", form.id);
                println!("name:     {}", form.name);
                println!("price:    {}", form.price);
                println!("category: {}", form.category);
            }
            _ => {}
        }
    }
    Ok(())
}
