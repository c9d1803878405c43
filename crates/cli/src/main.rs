//! Catalog CLI - manage categories and products from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a category and a product filed under it
//! catalog category add -n Drinks -d Beverages
//! catalog product add -n Cola -p 2.5 -c 1
//!
//! # Patch a product: blank fields keep their stored values
//! catalog product update --id 1 -p 3
//!
//! # Run an inline row action
//! catalog action product.delete 1
//!
//! # Delete a category and its products without prompting
//! catalog --yes category delete --id 1
//!
//! # Write the catalog page
//! catalog render -o catalog.html
//! ```
//!
//! # Commands
//!
//! - `category` - Add, update or delete categories
//! - `product` - Add, update or delete products
//! - `action` - Run an inline action by name and record id
//! - `list` - Print categories and products
//! - `render` - Render the catalog page
//! - `migrate` - Create or upgrade the database

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

use commands::CliError;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Catalog manager for categories and products")]
struct Cli {
    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Run an inline action (`category.edit`, `category.delete`,
    /// `product.edit`, `product.update`, `product.delete`)
    Action {
        /// Action name
        #[arg(value_name = "ACTION")]
        action: String,
        /// Record id
        id: String,
        /// Product form values used by `product.update`
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Print categories and products
    List,
    /// Render the catalog page as HTML
    Render {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Create the database if needed and apply pending migrations
    Migrate,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Update a category selected by id, or by name when no id is given
    Update {
        #[arg(long, default_value = "")]
        id: String,
        /// New name (also used to find the category without an id)
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a category and every product filed under it
    Delete {
        #[arg(long, default_value = "")]
        id: String,
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        price: String,
        /// Category id (blank or 0 for none)
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Patch a product selected by id, or by name when no id is given
    Update {
        #[arg(long, default_value = "")]
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product by id
    Delete {
        #[arg(long)]
        id: String,
    },
}

/// Product form fields; blank keeps the stored value on update.
#[derive(Args)]
struct ProductFields {
    #[arg(short, long, default_value = "")]
    name: String,
    #[arg(short, long, default_value = "")]
    price: String,
    /// Category id, or `none`/`0` to clear it
    #[arg(short, long, default_value = "")]
    category: String,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so command output stays clean. `CATALOG_LOG_FORMAT=json`
/// switches to structured lines.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let is_json = std::env::var("CATALOG_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if matches!(cli.command, Commands::Migrate) {
        return commands::migrate::run().await;
    }

    let mut catalog = commands::open_catalog(cli.yes).await?;
    match cli.command {
        Commands::Category { action } => match action {
            CategoryAction::Add { name, description } => {
                commands::category::add(&mut catalog, name, description).await?;
            }
            CategoryAction::Update {
                id,
                name,
                description,
            } => commands::category::update(&mut catalog, id, name, description).await?,
            CategoryAction::Delete { id, name } => {
                commands::category::delete(&mut catalog, id, name).await?;
            }
        },
        Commands::Product { action } => match action {
            ProductAction::Add {
                name,
                price,
                category,
            } => commands::product::add(&mut catalog, name, price, category).await?,
            ProductAction::Update { id, fields } => {
                commands::product::update(&mut catalog, id, fields.into_form()).await?;
            }
            ProductAction::Delete { id } => commands::product::delete(&mut catalog, id).await?,
        },
        Commands::Action { action, id, fields } => {
            commands::action::run(&mut catalog, &action, &id, fields.into_form()).await?;
        }
        Commands::List => commands::list::run(&catalog),
        Commands::Render { output } => commands::render::run(&catalog, output.as_deref())?,
        Commands::Migrate => {}
    }
    catalog.store().close().await;
    Ok(())
}

impl ProductFields {
    fn into_form(self) -> catalog_core::ProductForm {
        catalog_core::ProductForm {
            id: String::new(),
            name: self.name,
            price: self.price,
            category: self.category,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_action_keeps_name_and_product_fields_apart() {
        let cli = Cli::try_parse_from([
            "catalog",
            "action",
            "product.update",
            "3",
            "--name",
            "Cola",
            "-p",
            "2.5",
        ])
        .unwrap();

        let Commands::Action { action, id, fields } = cli.command else {
            panic!("expected the action command");
        };
        assert_eq!(action, "product.update");
        assert_eq!(id, "3");
        assert_eq!(fields.name, "Cola");
        assert_eq!(fields.price, "2.5");
        assert_eq!(fields.category, "");
    }

    #[test]
    fn test_yes_is_global() {
        let cli = Cli::try_parse_from(["catalog", "product", "delete", "--id", "1", "--yes"]).unwrap();
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Commands::Product {
                action: ProductAction::Delete { .. }
            }
        ));
    }
}
