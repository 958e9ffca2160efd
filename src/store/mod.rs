//! Product Record Store
//!
//! Holds the product collection as a single JSON array in a flat file. Every
//! operation reads the whole file; every mutation rewrites it.

pub mod persistence;

use crate::error::StoreError;
use crate::product::{IdPolicy, Product, ProductFields};
use async_trait::async_trait;

pub use persistence::JsonFileProductStore;

/// Behavior knobs for a store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Id assignment policy for `add`
    pub id_policy: IdPolicy,
    /// Reject `add` calls missing any required field
    pub validate_on_add: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::Sequential,
            validate_on_add: true,
        }
    }
}

/// Product store interface
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All records, in file order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// First record with the given id.
    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError>;

    /// Assign a fresh id, append the record and persist.
    async fn add(&self, fields: ProductFields) -> Result<Product, StoreError>;

    /// Replace the whole record for `id`, keeping only the id.
    async fn update(&self, id: &str, fields: ProductFields) -> Result<Product, StoreError>;

    /// Remove the record for `id` and return it.
    async fn delete(&self, id: &str) -> Result<Product, StoreError>;
}
