//! Core types for the bakery catalog.
//!
//! This module provides type-safe wrappers for the product resource.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::Price;
pub use product::{Images, NewProduct, Product, ProductPatch};
