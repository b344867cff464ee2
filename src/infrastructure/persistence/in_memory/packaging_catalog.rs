//! # In-Memory Packaging Catalog
//!
//! In-memory implementation of [`PackagingCatalog`].
//!
//! Reads never await, so a `parking_lot` lock is enough.

use crate::domain::value_objects::{Packaging, PackagingId};
use crate::infrastructure::persistence::traits::{PackagingCatalog, RepositoryResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory implementation of [`PackagingCatalog`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPackagingCatalog {
    entries: Arc<RwLock<BTreeMap<PackagingId, Packaging>>>,
}

impl InMemoryPackagingCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from records.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = (PackagingId, Packaging)>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    /// Adds or replaces a record.
    pub fn insert(&self, id: PackagingId, packaging: Packaging) {
        self.entries.write().insert(id, packaging);
    }
}

#[async_trait]
impl PackagingCatalog for InMemoryPackagingCatalog {
    async fn get(&self, id: &PackagingId) -> RepositoryResult<Option<Packaging>> {
        Ok(self.entries.read().get(id).copied())
    }

    async fn list(&self) -> RepositoryResult<Vec<(PackagingId, Packaging)>> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(id, packaging)| (id.clone(), *packaging))
            .collect())
    }
}
