//! # Order Workflow Service
//!
//! Runs order operations against the authoritative store.
//!
//! Each mutation:
//!
//! 1. takes the order's in-flight slot (one pending mutation per order)
//! 2. loads the order and the current company
//! 3. checks the operation locally, so illegal ones are never sent
//! 4. sends it with the version it was checked against
//! 5. returns the stored snapshot, the receipt and the event
//!
//! A version conflict surfaces as [`ApplicationError::StaleOrder`] and is
//! never replayed; the caller refetches and recomputes the legal operations.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::order::{
    AffectedResources, Order, OrderPayload, TransitionReceipt,
};
use crate::domain::entities::price_spec::PriceSpec;
use crate::domain::events::{OrderCreated, OrderRepriced, OrderStatusChanged};
use crate::domain::services::order_transition::transition;
use crate::domain::services::price_conversion::supported_price_units;
use crate::domain::services::quantity_conversion::canonical_quantity;
use crate::domain::value_objects::{
    CompanyId, ExposedAction, OrderId, OrderOperation, OrderType, PackagingId, PaperSpec,
    QuantityUnit, TradePath,
};
use crate::infrastructure::config::WorkflowSettings;
use crate::infrastructure::persistence::traits::{
    CompanyDirectory, OrderGateway, PackagingCatalog, RepositoryError,
};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

/// What to do with a mutation while another is pending on the same order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InFlightPolicy {
    /// Fail fast with [`ApplicationError::TransitionInFlight`].
    #[default]
    Reject,
    /// Wait for the pending one to finish, then check against fresh state.
    Queue,
}

impl fmt::Display for InFlightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "REJECT"),
            Self::Queue => write!(f, "QUEUE"),
        }
    }
}

/// Result of a workflow operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutcome {
    /// Order as stored afterwards.
    pub order: Order,
    /// What the operation did.
    pub receipt: TransitionReceipt,
    /// Emitted when the status changed.
    pub event: Option<OrderStatusChanged>,
}

/// Orchestrates order operations over the three collaborators.
pub struct OrderWorkflowService {
    gateway: Arc<dyn OrderGateway>,
    directory: Arc<dyn CompanyDirectory>,
    catalog: Arc<dyn PackagingCatalog>,
    policy: InFlightPolicy,
    in_flight: DashMap<OrderId, Arc<Mutex<()>>>,
}

impl fmt::Debug for OrderWorkflowService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderWorkflowService")
            .field("policy", &self.policy)
            .field("tracked_orders", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl OrderWorkflowService {
    /// Creates a service with the default [`InFlightPolicy::Reject`].
    #[must_use]
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        directory: Arc<dyn CompanyDirectory>,
        catalog: Arc<dyn PackagingCatalog>,
    ) -> Self {
        Self {
            gateway,
            directory,
            catalog,
            policy: InFlightPolicy::default(),
            in_flight: DashMap::new(),
        }
    }

    /// Creates a service configured from [`WorkflowSettings`].
    #[must_use]
    pub fn from_settings(
        gateway: Arc<dyn OrderGateway>,
        directory: Arc<dyn CompanyDirectory>,
        catalog: Arc<dyn PackagingCatalog>,
        settings: &WorkflowSettings,
    ) -> Self {
        Self::new(gateway, directory, catalog).with_policy(settings.in_flight_policy)
    }

    /// Sets the in-flight policy.
    #[must_use]
    pub fn with_policy(mut self, policy: InFlightPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the in-flight policy.
    #[must_use]
    pub fn policy(&self) -> InFlightPolicy {
        self.policy
    }

    // ========== Queries ==========

    /// Loads an order.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if it does not exist.
    pub async fn order(&self, id: OrderId) -> ApplicationResult<Order> {
        self.gateway
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Order", id.to_string()))
    }

    /// Orders of the current company.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` on collaborator failure.
    pub async fn orders(&self) -> ApplicationResult<Vec<Order>> {
        let me = self.directory.current_company().await?;
        Ok(self.gateway.find_by_company(me.id()).await?)
    }

    /// Actions the current company can take on an order right now.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` on collaborator failure.
    pub async fn legal_operations(&self, id: OrderId) -> ApplicationResult<Vec<ExposedAction>> {
        let me = self.directory.current_company().await?;
        let order = self.order(id).await?;
        Ok(order.legal_operations(me.id()))
    }

    /// Builds a paper spec from catalog packaging and form figures.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` if the packaging is unknown
    /// - `ApplicationError::Domain` if the figures are not usable
    pub async fn build_paper_spec(
        &self,
        packaging_id: &PackagingId,
        grammage: Decimal,
        size_x: Decimal,
        size_y: Decimal,
    ) -> ApplicationResult<PaperSpec> {
        let packaging = self
            .catalog
            .get(packaging_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Packaging", packaging_id.as_str()))?;
        Ok(PaperSpec::try_new(grammage, size_x, size_y, packaging)?)
    }

    // ========== Commands ==========

    /// Opens an order with `counterparty` on behalf of the current company.
    ///
    /// On the offer path the current company sells; on the order path it buys.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` if the counterparty is unknown
    /// - `ApplicationError::Domain` if the order is invalid
    pub async fn create_order(
        &self,
        path: TradePath,
        counterparty: &CompanyId,
        order_type: OrderType,
        payload: OrderPayload,
    ) -> ApplicationResult<(Order, OrderCreated)> {
        let me = self.directory.current_company().await?;
        let other = self
            .directory
            .get(counterparty)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Company", counterparty.as_str()))?;

        let (src, dst) = match path {
            TradePath::Offer => (me.to_ref(), other.to_ref()),
            TradePath::Order => (other.to_ref(), me.to_ref()),
        };
        let order = Order::new(path, src, dst, order_type, payload)?;
        self.gateway.create(&order).await?;

        info!(
            order_id = %order.id(),
            path = %path,
            order_type = %order_type,
            counterparty = %counterparty,
            virtual_counterparty = other.is_managed(),
            "order created"
        );
        let event = OrderCreated::for_order(&order);
        Ok((order, event))
    }

    /// Applies a workflow operation for the current company.
    ///
    /// Repeating an operation the order already reflects succeeds without
    /// contacting the store.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::TransitionInFlight` under [`InFlightPolicy::Reject`]
    /// - `ApplicationError::Domain` for illegal or unpermitted operations
    /// - `ApplicationError::StaleOrder` if the order changed meanwhile
    pub async fn transition(
        &self,
        id: OrderId,
        operation: OrderOperation,
    ) -> ApplicationResult<WorkflowOutcome> {
        let _slot = self.acquire(id).await?;
        let me = self.directory.current_company().await?;
        let order = self.order(id).await?;

        let checked = transition(order.status(), operation, &order.transition_context(me.id()))
            .inspect_err(|e| {
                debug!(order_id = %id, operation = %operation, error = %e, "operation refused locally");
            })?;

        if !checked.changed {
            debug!(order_id = %id, operation = %operation, status = %order.status(), "operation already applied");
            return Ok(WorkflowOutcome {
                receipt: TransitionReceipt {
                    operation,
                    from: checked.from,
                    to: checked.to,
                    changed: false,
                    affected: AffectedResources::none(),
                },
                order,
                event: None,
            });
        }

        let result = self
            .gateway
            .execute_transition(id, operation, me.id(), order.version())
            .await
            .map_err(|e| store_error(id, e))?;

        info!(
            order_id = %id,
            operation = %operation,
            from = %result.receipt.from,
            to = %result.receipt.to,
            affected = result.receipt.affected.len(),
            "order transition applied"
        );
        let event = OrderStatusChanged::from_receipt(id, &result.receipt, me.id().clone());
        Ok(WorkflowOutcome {
            order: result.order,
            receipt: result.receipt,
            event,
        })
    }

    /// [`OrderWorkflowService::transition`] for a user-facing action.
    ///
    /// # Errors
    ///
    /// Same as [`OrderWorkflowService::transition`].
    pub async fn perform(
        &self,
        id: OrderId,
        action: ExposedAction,
    ) -> ApplicationResult<WorkflowOutcome> {
        self.transition(id, action.operation()).await
    }

    /// Replaces the canonical quantity.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::TransitionInFlight` under [`InFlightPolicy::Reject`]
    /// - `ApplicationError::Domain` if the order is not editable
    /// - `ApplicationError::StaleOrder` if the order changed meanwhile
    pub async fn update_quantity(
        &self,
        id: OrderId,
        quantity: Decimal,
    ) -> ApplicationResult<(Order, OrderRepriced)> {
        let _slot = self.acquire(id).await?;
        let me = self.directory.current_company().await?;
        let order = self.order(id).await?;

        // local check before touching the store
        order.clone().update_quantity(me.id(), quantity)?;

        let updated = self
            .gateway
            .update_quantity(id, me.id(), quantity, order.version())
            .await
            .map_err(|e| store_error(id, e))?;

        info!(order_id = %id, quantity = %quantity, "order quantity updated");
        let event = OrderRepriced::for_order(&updated, me.id().clone());
        Ok((updated, event))
    }

    /// Replaces the quantity with a value typed in `unit`.
    ///
    /// # Errors
    ///
    /// `ApplicationError::Validation` if the order's packaging does not
    /// support `unit`; otherwise as [`OrderWorkflowService::update_quantity`].
    pub async fn update_quantity_in(
        &self,
        id: OrderId,
        unit: QuantityUnit,
        value: Decimal,
    ) -> ApplicationResult<(Order, OrderRepriced)> {
        let order = self.order(id).await?;
        let spec = order.spec();
        let canonical = canonical_quantity(spec, unit, value).ok_or_else(|| {
            ApplicationError::validation(format!(
                "{unit} is not a quantity unit for {} packaging",
                spec.packaging_type()
            ))
        })?;
        self.update_quantity(id, canonical).await
    }

    /// Replaces the pricing.
    ///
    /// # Errors
    ///
    /// `ApplicationError::Validation` if a price basis does not apply to the
    /// order's packaging; otherwise as [`OrderWorkflowService::update_quantity`].
    pub async fn update_price(
        &self,
        id: OrderId,
        price: PriceSpec,
    ) -> ApplicationResult<(Order, OrderRepriced)> {
        let _slot = self.acquire(id).await?;
        let me = self.directory.current_company().await?;
        let order = self.order(id).await?;

        let supported = supported_price_units(order.spec().packaging());
        if !supported.contains(&price.unit_price_unit()) {
            return Err(ApplicationError::validation(format!(
                "{} does not apply to {} packaging",
                price.unit_price_unit(),
                order.spec().packaging_type()
            )));
        }
        order.clone().update_price(me.id(), price)?;

        let updated = self
            .gateway
            .update_price(id, me.id(), price, order.version())
            .await
            .map_err(|e| store_error(id, e))?;

        info!(
            order_id = %id,
            unit_price = %price.unit_price(),
            unit = %price.unit_price_unit(),
            "order price updated"
        );
        let event = OrderRepriced::for_order(&updated, me.id().clone());
        Ok((updated, event))
    }

    // ========== Internals ==========

    async fn acquire(&self, id: OrderId) -> ApplicationResult<InFlightSlot<'_>> {
        let slot = Arc::clone(self.in_flight.entry(id).or_default().value());
        let guard = match self.policy {
            InFlightPolicy::Reject => slot.try_lock_owned().map_err(|_| {
                warn!(order_id = %id, "operation rejected: another is in flight");
                ApplicationError::TransitionInFlight(id)
            }),
            InFlightPolicy::Queue => Ok(slot.lock_owned().await),
        };
        // a rejected attempt may be the last one to see the slot
        let guard = guard.inspect_err(|_| self.release(id))?;
        Ok(InFlightSlot {
            guard: Some(guard),
            id,
            slots: &self.in_flight,
        })
    }

    fn release(&self, id: OrderId) {
        release_slot(&self.in_flight, id);
    }
}

/// Holds an order's in-flight slot; the map entry goes away with the last holder.
struct InFlightSlot<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    id: OrderId,
    slots: &'a DashMap<OrderId, Arc<Mutex<()>>>,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        release_slot(self.slots, self.id);
    }
}

fn release_slot(slots: &DashMap<OrderId, Arc<Mutex<()>>>, id: OrderId) {
    slots.remove_if(&id, |_, slot| Arc::strong_count(slot) == 1);
}

fn store_error(id: OrderId, err: RepositoryError) -> ApplicationError {
    let err = ApplicationError::from(err);
    if err.is_stale() {
        warn!(order_id = %id, error = %err, "order changed since it was loaded");
    } else {
        warn!(order_id = %id, error = %err, "store refused operation");
    }
    err
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::company::Company;
    use crate::domain::entities::order::PaperLine;
    use crate::domain::value_objects::{OrderStatus, Packaging, PriceUnit};
    use crate::infrastructure::persistence::in_memory::{
        InMemoryCompanyDirectory, InMemoryOrderGateway, InMemoryPackagingCatalog,
    };

    struct Fixture {
        service: OrderWorkflowService,
        gateway: Arc<InMemoryOrderGateway>,
        directory: Arc<InMemoryCompanyDirectory>,
    }

    fn mill() -> CompanyId {
        CompanyId::new("mill")
    }

    fn printer() -> CompanyId {
        CompanyId::new("printer")
    }

    fn walk_in() -> CompanyId {
        CompanyId::new("walk-in")
    }

    async fn fixture() -> Fixture {
        let gateway = Arc::new(InMemoryOrderGateway::new());
        let directory = Arc::new(InMemoryCompanyDirectory::new());
        directory.insert(Company::new(mill(), "Mill")).await;
        directory.insert(Company::new(printer(), "Printer")).await;
        directory
            .insert(Company::managed(walk_in(), "Walk-in", mill()))
            .await;
        directory.act_as(mill()).await;

        let catalog = Arc::new(InMemoryPackagingCatalog::with_entries([
            (
                PackagingId::new("box"),
                Packaging::Box {
                    pack_a: 2,
                    pack_b: 250,
                },
            ),
            (PackagingId::new("ream"), Packaging::Ream { pack_a: 250 }),
        ]));

        let service = OrderWorkflowService::new(gateway.clone(), directory.clone(), catalog);
        Fixture {
            service,
            gateway,
            directory,
        }
    }

    fn box_line() -> PaperLine {
        PaperLine::new(
            PaperSpec::new(
                Decimal::new(100, 0),
                Decimal::new(500, 0),
                Decimal::new(700, 0),
                Packaging::Box {
                    pack_a: 2,
                    pack_b: 250,
                },
            ),
            Decimal::new(10, 0),
        )
    }

    async fn offer(f: &Fixture, to: CompanyId) -> Order {
        let (order, event) = f
            .service
            .create_order(
                TradePath::Offer,
                &to,
                OrderType::Normal,
                OrderPayload::stock(box_line()),
            )
            .await
            .unwrap();
        assert_eq!(event.src_company, mill());
        order
    }

    #[tokio::test]
    async fn request_and_accept() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        let outcome = f
            .service
            .transition(order.id(), OrderOperation::Request)
            .await
            .unwrap();
        assert_eq!(outcome.order.status(), OrderStatus::OfferRequested);
        assert!(outcome.event.is_some());

        f.directory.act_as(printer()).await;
        assert_eq!(
            f.service.legal_operations(order.id()).await.unwrap(),
            vec![ExposedAction::Accept, ExposedAction::Reject]
        );
        let outcome = f
            .service
            .perform(order.id(), ExposedAction::Accept)
            .await
            .unwrap();
        assert_eq!(outcome.order.status(), OrderStatus::Accepted);
    }

    #[tokio::test]
    async fn register_with_virtual_counterparty() {
        let f = fixture().await;
        let order = offer(&f, walk_in()).await;
        assert_eq!(
            f.service.legal_operations(order.id()).await.unwrap(),
            vec![ExposedAction::Register, ExposedAction::Cancel]
        );

        let outcome = f
            .service
            .perform(order.id(), ExposedAction::Register)
            .await
            .unwrap();
        assert_eq!(outcome.receipt.from, OrderStatus::OfferPreparing);
        assert_eq!(outcome.order.status(), OrderStatus::Accepted);
    }

    #[tokio::test]
    async fn illegal_operation_never_reaches_store() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        let err = f
            .service
            .transition(order.id(), OrderOperation::Reject)
            .await
            .unwrap_err();
        assert!(err.is_illegal_transition());
        assert_eq!(f.service.order(order.id()).await.unwrap().version(), 1);
    }

    #[tokio::test]
    async fn repeated_cancel_is_local_no_op() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;
        f.service
            .transition(order.id(), OrderOperation::Cancel)
            .await
            .unwrap();

        let outcome = f
            .service
            .transition(order.id(), OrderOperation::Cancel)
            .await
            .unwrap();
        assert!(!outcome.receipt.changed);
        assert!(outcome.receipt.affected.is_empty());
        assert!(outcome.event.is_none());
        assert_eq!(outcome.order.version(), 2);
    }

    #[tokio::test]
    async fn in_flight_slot_rejects() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        let held = f.service.acquire(order.id()).await.unwrap();
        let err = f
            .service
            .transition(order.id(), OrderOperation::Request)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::TransitionInFlight(id) if id == order.id()));

        drop(held);
        f.service
            .transition(order.id(), OrderOperation::Request)
            .await
            .unwrap();
        assert!(f.service.in_flight.is_empty());
    }

    #[tokio::test]
    async fn slots_released_after_operations() {
        let f = fixture().await;
        for _ in 0..5 {
            let order = offer(&f, printer()).await;
            f.service
                .update_quantity(order.id(), Decimal::new(3, 0))
                .await
                .unwrap();
            f.service
                .transition(order.id(), OrderOperation::Request)
                .await
                .unwrap();
        }
        // failed operations release too
        let order = offer(&f, printer()).await;
        f.service
            .transition(order.id(), OrderOperation::Reject)
            .await
            .unwrap_err();

        assert!(f.service.in_flight.is_empty());
        assert!(format!("{:?}", f.service).contains("tracked_orders: 0"));
    }

    #[tokio::test]
    async fn queued_slot_released_after_holder() {
        let f = fixture().await;
        let service = Arc::new(
            OrderWorkflowService::new(
                f.gateway.clone(),
                f.directory.clone(),
                Arc::new(InMemoryPackagingCatalog::new()),
            )
            .with_policy(InFlightPolicy::Queue),
        );
        let order = offer(&f, printer()).await;

        let held = service.acquire(order.id()).await.unwrap();
        let waiting = tokio::spawn({
            let service = Arc::clone(&service);
            async move {
                service
                    .transition(order.id(), OrderOperation::Request)
                    .await
                    .map(|outcome| outcome.order.status())
            }
        });
        tokio::task::yield_now().await;
        drop(held);

        assert_eq!(waiting.await.unwrap().unwrap(), OrderStatus::OfferRequested);
        assert!(service.in_flight.is_empty());
    }

    #[tokio::test]
    async fn policy_from_settings() {
        let f = fixture().await;
        let settings: WorkflowSettings =
            serde_json::from_str(r#"{"in_flight_policy": "QUEUE"}"#).unwrap();
        let service = OrderWorkflowService::from_settings(
            f.gateway.clone(),
            f.directory.clone(),
            Arc::new(InMemoryPackagingCatalog::new()),
            &settings,
        );
        assert_eq!(service.policy(), InFlightPolicy::Queue);

        let service = OrderWorkflowService::from_settings(
            f.gateway.clone(),
            f.directory.clone(),
            Arc::new(InMemoryPackagingCatalog::new()),
            &WorkflowSettings::default(),
        );
        assert_eq!(service.policy(), InFlightPolicy::Reject);
    }

    #[tokio::test]
    async fn quantity_in_display_unit() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        // 0.35 t of 17.5 kg boxes
        let (updated, event) = f
            .service
            .update_quantity_in(order.id(), QuantityUnit::Ton, Decimal::new(35, 2))
            .await
            .unwrap();
        assert_eq!(updated.quantity(), Decimal::new(20, 0));
        assert_eq!(event.quantity, Decimal::new(20, 0));

        let err = f
            .service
            .update_quantity_in(order.id(), QuantityUnit::Sheet, Decimal::ONE)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn price_basis_must_fit_packaging() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        let (updated, event) = f
            .service
            .update_price(
                order.id(),
                PriceSpec::direct(Decimal::new(20_000, 0), PriceUnit::WonPerBox),
            )
            .await
            .unwrap();
        assert_eq!(updated.supply_amount(), Decimal::new(200_000, 0));
        assert_eq!(event.supply_amount, Decimal::new(200_000, 0));

        // a ream order has no box basis
        let (ream_order, _) = f
            .service
            .create_order(
                TradePath::Offer,
                &printer(),
                OrderType::Normal,
                OrderPayload::stock(PaperLine::new(
                    PaperSpec::new(
                        Decimal::new(80, 0),
                        Decimal::new(636, 0),
                        Decimal::new(939, 0),
                        Packaging::Ream { pack_a: 250 },
                    ),
                    Decimal::new(4, 0),
                )),
            )
            .await
            .unwrap();
        let err = f
            .service
            .update_price(
                ream_order.id(),
                PriceSpec::direct(Decimal::new(20_000, 0), PriceUnit::WonPerBox),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn ream_basis_on_box_order() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        // 10 boxes of 500 sheets are 10 reams
        let (updated, _) = f
            .service
            .update_price(
                order.id(),
                PriceSpec::direct(Decimal::new(10_000, 0), PriceUnit::WonPerReam),
            )
            .await
            .unwrap();
        assert_eq!(updated.supply_amount(), Decimal::new(100_000, 0));
    }

    #[tokio::test]
    async fn stale_order_is_reported() {
        let f = fixture().await;
        let order = offer(&f, printer()).await;

        // another session moves the order without this service knowing
        let mut moved = order.clone();
        moved.request(&mill()).unwrap();
        f.gateway.force_put(moved.clone()).await;

        // the service sees the new status and refuses cancel locally
        let err = f
            .service
            .transition(order.id(), OrderOperation::Cancel)
            .await
            .unwrap_err();
        assert!(err.is_illegal_transition());

        // a stale edit against the old version is caught by the store
        let err = f
            .gateway
            .update_quantity(order.id(), &mill(), Decimal::ONE, order.version())
            .await
            .map_err(ApplicationError::from)
            .unwrap_err();
        assert!(err.is_stale());
    }

    #[tokio::test]
    async fn build_paper_spec_from_catalog() {
        let f = fixture().await;
        let spec = f
            .service
            .build_paper_spec(
                &PackagingId::new("ream"),
                Decimal::new(80, 0),
                Decimal::new(636, 0),
                Decimal::new(939, 0),
            )
            .await
            .unwrap();
        assert_eq!(spec.packaging(), Packaging::Ream { pack_a: 250 });

        let err = f
            .service
            .build_paper_spec(
                &PackagingId::new("skid"),
                Decimal::new(80, 0),
                Decimal::new(636, 0),
                Decimal::new(939, 0),
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn orders_of_current_company() {
        let f = fixture().await;
        offer(&f, printer()).await;
        offer(&f, walk_in()).await;
        assert_eq!(f.service.orders().await.unwrap().len(), 2);

        f.directory.act_as(printer()).await;
        assert_eq!(f.service.orders().await.unwrap().len(), 1);
    }
}
