use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{ProductMap, Records, SubscriptionId};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("product store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize product store: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to move product store into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Durable mapping of subscription identity → product → price.
///
/// Every mutating call persists before returning. When the save fails the
/// in-memory change is undone, so memory and disk never disagree about a
/// committed write.
#[derive(Debug)]
pub struct ProductStore {
    path: PathBuf,
    products: Records,
}

impl ProductStore {
    /// Open the store at `path`.
    ///
    /// A missing file is created empty. A file that exists but does not parse
    /// is reported as [`StoreError::Corrupt`] rather than silently replaced.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.into(),
            products: Records::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the backing file, discarding the in-memory state.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => {
                let products: Records =
                    serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
                        path: self.path.clone(),
                        source,
                    })?;
                // an identity with no products left is never written, drop any hand-edited ones
                self.products = products
                    .into_iter()
                    .filter(|(_, inner)| !inner.is_empty())
                    .collect();
                info!(
                    "Loaded {} product records from {}",
                    self.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "No product store at {}, creating an empty one",
                    self.path.display()
                );
                if let Some(parent) = self.parent_dir() {
                    fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
                }
                self.products = Records::new();
                self.save()
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Write the full mapping to disk, replacing the previous contents.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.products).map_err(StoreError::Serialize)?;

        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)?;

        debug!("Saved product store to {}", self.path.display());
        Ok(())
    }

    /// Insert or overwrite the price of `name` under `id`.
    pub fn add_product(
        &mut self,
        id: SubscriptionId,
        name: &str,
        price: f64,
    ) -> Result<(), StoreError> {
        let previous = self
            .products
            .entry(id)
            .or_default()
            .insert(name.to_string(), price);

        if let Err(e) = self.save() {
            match previous {
                Some(old) => {
                    self.set(id, name, old);
                }
                None => {
                    self.take(id, name);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Change the price of an existing entry.
    ///
    /// Returns `Ok(false)` without touching anything if `id` or `name` is
    /// unknown.
    pub fn update_price(
        &mut self,
        id: SubscriptionId,
        name: &str,
        new_price: f64,
    ) -> Result<bool, StoreError> {
        let Some(old) = self.set(id, name, new_price) else {
            return Ok(false);
        };

        if let Err(e) = self.save() {
            self.set(id, name, old);
            return Err(e);
        }
        Ok(true)
    }

    /// Products tracked under `id`, or an empty map if there are none.
    pub fn get_products(&self, id: SubscriptionId) -> ProductMap {
        self.products.get(&id).cloned().unwrap_or_default()
    }

    pub fn contains(&self, id: SubscriptionId, name: &str) -> bool {
        self.products
            .get(&id)
            .is_some_and(|inner| inner.contains_key(name))
    }

    pub fn contains_id(&self, id: SubscriptionId) -> bool {
        self.products.contains_key(&id)
    }

    /// Delete the entry, pruning `id` once it has no products left.
    ///
    /// Returns `Ok(false)` and skips the write if there was nothing to remove.
    pub fn remove_product(&mut self, id: SubscriptionId, name: &str) -> Result<bool, StoreError> {
        let Some(old) = self.take(id, name) else {
            return Ok(false);
        };

        if let Err(e) = self.save() {
            self.products
                .entry(id)
                .or_default()
                .insert(name.to_string(), old);
            return Err(e);
        }
        Ok(true)
    }

    pub fn records(&self) -> &Records {
        &self.products
    }

    pub fn identities(&self) -> impl Iterator<Item = SubscriptionId> + '_ {
        self.products.keys().copied()
    }

    /// Number of (identity, product) records.
    pub fn len(&self) -> usize {
        self.products.values().map(|inner| inner.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Overwrite an existing entry in memory only, returning the old price.
    fn set(&mut self, id: SubscriptionId, name: &str, price: f64) -> Option<f64> {
        let slot = self.products.get_mut(&id)?.get_mut(name)?;
        Some(std::mem::replace(slot, price))
    }

    /// Remove an entry in memory only, pruning the emptied identity.
    fn take(&mut self, id: SubscriptionId, name: &str) -> Option<f64> {
        let inner = self.products.get_mut(&id)?;
        let old = inner.remove(name)?;
        if inner.is_empty() {
            self.products.remove(&id);
        }
        Some(old)
    }
}
