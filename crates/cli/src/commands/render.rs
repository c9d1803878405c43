//! Render command.

use std::path::Path;

use catalog_admin::Catalog;

use super::CliError;
use crate::terminal::TerminalUi;

/// Write the catalog page to `output`, or to stdout.
pub fn run(catalog: &Catalog<TerminalUi>, output: Option<&Path>) -> Result<(), CliError> {
    let page = catalog.view().render_page()?;
    match output {
        Some(path) => {
            std::fs::write(path, page)?;
            tracing::info!(path = %path.display(), "Catalog page written");
        }
        None => {
            #[allow(clippy::print_stdout)]
            {
                println!("{page}");
            }
        }
    }
    Ok(())
}
