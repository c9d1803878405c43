//! Catalog Core - Shared types library.
//!
//! This crate provides the types used across all catalog components:
//! - `admin` - Storage gateway, managers and the render/refresh layer
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access. The optional `sqlite` feature adds `sqlx` encoding for the ids.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices and the `Category`/`Product` records
//! - [`forms`] - Raw form state and the rules that turn it into records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod forms;
pub mod types;

pub use forms::*;
pub use types::*;
