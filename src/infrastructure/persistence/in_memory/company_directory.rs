//! # In-Memory Company Directory
//!
//! In-memory implementation of [`CompanyDirectory`] for testing.

use crate::domain::entities::company::Company;
use crate::domain::value_objects::CompanyId;
use crate::infrastructure::persistence::traits::{
    CompanyDirectory, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`CompanyDirectory`].
///
/// The current company can be switched to act as either side of an order.
#[derive(Debug, Clone)]
pub struct InMemoryCompanyDirectory {
    storage: Arc<RwLock<HashMap<CompanyId, Company>>>,
    current: Arc<RwLock<Option<CompanyId>>>,
}

impl InMemoryCompanyDirectory {
    /// Creates an empty directory with no current company.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Adds or replaces a company.
    pub async fn insert(&self, company: Company) {
        let mut storage = self.storage.write().await;
        storage.insert(company.id().clone(), company);
    }

    /// Makes `id` the current company.
    pub async fn act_as(&self, id: CompanyId) {
        *self.current.write().await = Some(id);
    }
}

impl Default for InMemoryCompanyDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyDirectory for InMemoryCompanyDirectory {
    async fn current_company(&self) -> RepositoryResult<Company> {
        let current = self
            .current
            .read()
            .await
            .clone()
            .ok_or_else(|| RepositoryError::internal("no current company"))?;
        let storage = self.storage.read().await;
        storage
            .get(&current)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Company", current.to_string()))
    }

    async fn get(&self, id: &CompanyId) -> RepositoryResult<Option<Company>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }
}
