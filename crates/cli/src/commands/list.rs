//! List command.

use catalog_admin::Catalog;

use crate::terminal::TerminalUi;

/// Print the category options and product rows of the current view.
pub fn run(catalog: &Catalog<TerminalUi>) {
    let view = catalog.view();

    #[allow(clippy::print_stdout)]
    {
        println!("Categories:");
        for option in view.category_options.iter().filter(|o| !o.value.is_empty()) {
            println!("  {:>4}  {}", option.value, option.label);
        }

        println!("Products:");
        for row in &view.product_rows {
            let [name, price, category] = row.cells();
            println!("  {:>4}  {name:<24} {price:>10}  {category}", row.id);
        }
    }
}
