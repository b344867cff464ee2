//! # In-Memory Order Gateway
//!
//! In-memory implementation of [`OrderGateway`] for testing.
//!
//! Behaves like the authoritative backend: it re-runs the state machine on
//! its own copy of the order and refuses changes made against a stale
//! version.

use crate::domain::entities::order::Order;
use crate::domain::entities::price_spec::PriceSpec;
use crate::domain::value_objects::{CompanyId, OrderId, OrderOperation};
use crate::infrastructure::persistence::traits::{
    OrderGateway, RepositoryError, RepositoryResult, TransitionResult,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// In-memory implementation of [`OrderGateway`].
#[derive(Debug, Clone)]
pub struct InMemoryOrderGateway {
    storage: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderGateway {
    /// Creates a new empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if no orders are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrites an order, bypassing version checks.
    ///
    /// Simulates a change made by another session.
    pub async fn force_put(&self, order: Order) {
        let mut storage = self.storage.write().await;
        storage.insert(order.id(), order);
    }

    /// Loads the order for a versioned mutation, applies `f` to a copy and
    /// stores the copy only if `f` succeeds.
    async fn mutate<T: Send>(
        &self,
        id: OrderId,
        expected_version: u64,
        f: impl FnOnce(&mut Order) -> RepositoryResult<T> + Send,
    ) -> RepositoryResult<(Order, T)> {
        let mut storage = self.storage.write().await;
        let stored = storage
            .get(&id)
            .ok_or_else(|| RepositoryError::not_found("Order", id.to_string()))?;
        if stored.version() != expected_version {
            debug!(
                order_id = %id,
                expected = expected_version,
                actual = stored.version(),
                "version conflict"
            );
            return Err(RepositoryError::version_conflict(
                "Order",
                id.to_string(),
                expected_version,
                stored.version(),
            ));
        }

        let mut updated = stored.clone();
        let value = f(&mut updated)?;
        trace!(order_id = %id, version = updated.version(), status = %updated.status(), "order stored");
        storage.insert(id, updated.clone());
        Ok((updated, value))
    }
}

impl Default for InMemoryOrderGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn create(&self, order: &Order) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(&order.id()) {
            return Err(RepositoryError::duplicate("Order", order.id().to_string()));
        }
        storage.insert(order.id(), order.clone());
        Ok(())
    }

    async fn get(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn execute_transition(
        &self,
        id: OrderId,
        operation: OrderOperation,
        caller: &CompanyId,
        expected_version: u64,
    ) -> RepositoryResult<TransitionResult> {
        let (order, receipt) = self
            .mutate(id, expected_version, |order| {
                Ok(order.apply(operation, caller)?)
            })
            .await?;
        Ok(TransitionResult { order, receipt })
    }

    async fn update_quantity(
        &self,
        id: OrderId,
        caller: &CompanyId,
        quantity: Decimal,
        expected_version: u64,
    ) -> RepositoryResult<Order> {
        let (order, _) = self
            .mutate(id, expected_version, |order| {
                Ok(order.update_quantity(caller, quantity)?)
            })
            .await?;
        Ok(order)
    }

    async fn update_price(
        &self,
        id: OrderId,
        caller: &CompanyId,
        price: PriceSpec,
        expected_version: u64,
    ) -> RepositoryResult<Order> {
        let (order, _) = self
            .mutate(id, expected_version, |order| {
                Ok(order.update_price(caller, price)?)
            })
            .await?;
        Ok(order)
    }

    async fn find_by_company(&self, company: &CompanyId) -> RepositoryResult<Vec<Order>> {
        let storage = self.storage.read().await;
        let mut orders: Vec<Order> = storage
            .values()
            .filter(|o| o.role_of(company).is_party())
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at());
        Ok(orders)
    }
}
