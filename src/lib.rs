//! Product Store: File-Backed Product Catalog
//!
//! Keeps a single collection of product records as a JSON array in a flat
//! file, with store-assigned ids and full-rewrite persistence on every change.

pub mod config;
pub mod error;
pub mod logging;
pub mod product;
pub mod store;
pub mod tooling;

pub use error::{ApiError, StoreError};
pub use product::{IdPolicy, Product, ProductFields};
pub use store::{JsonFileProductStore, ProductStore, StoreOptions};
