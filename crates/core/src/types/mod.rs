//! Core types for the catalog.
//!
//! This module provides type-safe ids, prices and the two catalog records.

pub mod id;
pub mod price;
pub mod record;

pub use id::*;
pub use price::Price;
pub use record::{Category, Product};
