//! JSON file persistence for the product store.

use super::{ProductStore, StoreOptions};
use crate::error::StoreError;
use crate::product::{validate_new_product, Product, ProductFields};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Product store backed by a single JSON array file.
///
/// Mutations hold `write_lock` across their read-modify-write cycle, so
/// concurrent calls on one instance never drop each other's changes. Writes go
/// to a sibling temp file that is renamed over the target.
pub struct JsonFileProductStore {
    path: PathBuf,
    options: StoreOptions,
    write_lock: Mutex<()>,
}

impl JsonFileProductStore {
    /// Open the store at `path`, creating the file with `[]` if it is missing.
    pub async fn open<P: Into<PathBuf>>(path: P, options: StoreOptions) -> Result<Self, StoreError> {
        let path = path.into();
        ensure_store_file(&path).await?;
        debug!(path = %path.display(), ?options, "product store opened");
        Ok(Self {
            path,
            options,
            write_lock: Mutex::new(()),
        })
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::read(&self.path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::read(&self.path, e))
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec_pretty(products).map_err(|e| StoreError::write(&self.path, e))?;
        atomic_write(&self.path, &bytes).await?;
        debug!(path = %self.path.display(), count = products.len(), "product store saved");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for JsonFileProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.load().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn add(&self, fields: ProductFields) -> Result<Product, StoreError> {
        if self.options.validate_on_add {
            validate_new_product(&fields)?;
        }

        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let id = self.options.id_policy.next_id(&products)?;
        let product = Product::new(id, fields);
        products.push(product.clone());
        self.save(&products).await?;

        info!(id = %product.id, "product added");
        Ok(product)
    }

    async fn update(&self, id: &str, fields: ProductFields) -> Result<Product, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let replacement = Product::new(id, fields);
        *slot = replacement.clone();
        self.save(&products).await?;

        info!(id = %id, "product replaced");
        Ok(replacement)
    }

    async fn delete(&self, id: &str) -> Result<Product, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let removed = products.remove(index);
        self.save(&products).await?;

        info!(id = %id, remaining = products.len(), "product deleted");
        Ok(removed)
    }
}

async fn ensure_store_file(path: &Path) -> Result<(), StoreError> {
    if fs::try_exists(path)
        .await
        .map_err(|e| StoreError::read(path, e))?
    {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            StoreError::write(
                path,
                format!("failed to create parent directory {}: {}", parent.display(), e),
            )
        })?;
    }

    fs::write(path, b"[]")
        .await
        .map_err(|e| StoreError::write(path, e))?;
    info!(path = %path.display(), "created empty product store");
    Ok(())
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).await.map_err(|e| {
        StoreError::write(path, format!("failed to write temp file {}: {}", tmp.display(), e))
    })?;

    if let Err(e) = fs::rename(&tmp, path).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            warn!(tmp = %tmp.display(), error = %cleanup, "failed to remove temp file");
        }
        return Err(StoreError::write(
            path,
            format!("failed to rename temp file {}: {}", tmp.display(), e),
        ));
    }
    Ok(())
}
