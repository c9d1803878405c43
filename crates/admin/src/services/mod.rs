//! Catalog managers.
//!
//! # Services
//!
//! - `categories` - Category create/update/delete with the product cascade
//! - `products` - Product create, partial update and delete

pub mod categories;
pub mod products;

pub use categories::CategoryManager;
pub use products::ProductManager;

use crate::db::Record;
use crate::error::AppError;

/// Pick the only record a name lookup matched.
fn single_match<R: Record>(
    mut matches: Vec<R>,
    entity: &'static str,
    name: &str,
) -> Result<R, AppError> {
    match matches.len() {
        0 => Err(AppError::not_found(entity, format!("\"{name}\""))),
        1 => matches
            .pop()
            .ok_or_else(|| AppError::not_found(entity, format!("\"{name}\""))),
        count => Err(AppError::AmbiguousName {
            entity,
            name: name.to_owned(),
            count,
        }),
    }
}
