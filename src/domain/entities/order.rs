//! # Order Aggregate Root
//!
//! A trade order between a seller (source company) and a buyer
//! (destination company), carrying one paper line and its pricing.
//!
//! Status changes go through [`Order::apply`], which runs the pure
//! [`transition`] function with the caller's role and the counterparty's
//! virtual flag, then reports what changed as a [`TransitionReceipt`].
//!
//! # Examples
//!
//! ```
//! use paper_trade::domain::entities::company::Company;
//! use paper_trade::domain::entities::order::{Order, OrderPayload, PaperLine};
//! use paper_trade::domain::value_objects::{
//!     CompanyId, OrderStatus, OrderType, Packaging, PaperSpec, TradePath,
//! };
//! use rust_decimal::Decimal;
//!
//! let seller = Company::new(CompanyId::new("mill"), "Mill");
//! let buyer = Company::new(CompanyId::new("printer"), "Printer");
//! let spec = PaperSpec::new(
//!     Decimal::new(80, 0),
//!     Decimal::new(636, 0),
//!     Decimal::new(939, 0),
//!     Packaging::Ream { pack_a: 250 },
//! );
//!
//! let mut order = Order::new(
//!     TradePath::Offer,
//!     seller.to_ref(),
//!     buyer.to_ref(),
//!     OrderType::Normal,
//!     OrderPayload::stock(PaperLine::new(spec, Decimal::new(5_000, 0))),
//! )
//! .unwrap();
//!
//! order.request(seller.id()).unwrap();
//! let receipt = order.accept(buyer.id()).unwrap();
//! assert_eq!(receipt.to, OrderStatus::Accepted);
//! ```

use crate::domain::entities::company::CompanyRef;
use crate::domain::entities::price_spec::PriceSpec;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::order_transition::{
    TransitionContext, legal_operations, transition,
};
use crate::domain::services::quantity_conversion::{Quantity, convert_quantity};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{
    CompanyId, ExposedAction, OrderId, OrderOperation, OrderStatus, OrderType, PartyRole, PaperSpec,
    PlanId, TradePath,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The paper being traded: spec, canonical quantity and linked plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperLine {
    /// Physical spec.
    pub spec: PaperSpec,
    /// Canonical quantity (grams, sheets or boxes by packaging).
    pub quantity: Decimal,
    /// Production or shipping plan assigned to the line.
    pub plan_id: Option<PlanId>,
}

impl PaperLine {
    /// Creates a line with no plan assigned.
    #[must_use]
    pub fn new(spec: PaperSpec, quantity: Decimal) -> Self {
        Self {
            spec,
            quantity,
            plan_id: None,
        }
    }

    /// Assigns a plan.
    #[must_use]
    pub fn with_plan(mut self, plan_id: PlanId) -> Self {
        self.plan_id = Some(plan_id);
        self
    }
}

/// What the order moves, by order type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPayload {
    /// Stock delivered to the buyer.
    Stock {
        /// Traded paper.
        line: PaperLine,
        /// Delivery warehouse, if fixed.
        warehouse: Option<String>,
    },
    /// Outsourced conversion work.
    Process {
        /// Paper handed over for processing.
        line: PaperLine,
        /// Where the stock is picked up.
        src_location: Option<String>,
        /// Where the processed stock goes.
        dst_location: Option<String>,
    },
    /// Stock left on deposit with the seller.
    Deposit {
        /// Deposited paper.
        line: PaperLine,
    },
    /// Stock coming back from an earlier order.
    Return {
        /// Returned paper.
        line: PaperLine,
        /// Order the stock originally moved on.
        original_order: Option<OrderId>,
    },
}

impl OrderPayload {
    /// Stock payload with no warehouse.
    #[must_use]
    pub fn stock(line: PaperLine) -> Self {
        Self::Stock {
            line,
            warehouse: None,
        }
    }

    /// Deposit payload.
    #[must_use]
    pub fn deposit(line: PaperLine) -> Self {
        Self::Deposit { line }
    }

    /// Returns the paper line.
    #[must_use]
    pub fn line(&self) -> &PaperLine {
        match self {
            Self::Stock { line, .. }
            | Self::Process { line, .. }
            | Self::Deposit { line }
            | Self::Return { line, .. } => line,
        }
    }

    fn line_mut(&mut self) -> &mut PaperLine {
        match self {
            Self::Stock { line, .. }
            | Self::Process { line, .. }
            | Self::Deposit { line }
            | Self::Return { line, .. } => line,
        }
    }

    /// Returns true if `order_type` may carry this payload.
    #[must_use]
    pub fn fits(&self, order_type: OrderType) -> bool {
        matches!(
            (order_type, self),
            (OrderType::Normal | OrderType::Etc, Self::Stock { .. })
                | (OrderType::Deposit, Self::Deposit { .. })
                | (OrderType::OutsourceProcess, Self::Process { .. })
                | (OrderType::Return, Self::Return { .. })
        )
    }
}

/// Something a caller should refresh after a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "resource", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffectedResource {
    /// The order itself.
    Order(OrderId),
    /// A company's order list.
    OrderList(CompanyId),
    /// The plan linked to the order.
    Plan(PlanId),
}

/// Set of resources touched by a change. Empty when nothing changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AffectedResources(Vec<AffectedResource>);

impl AffectedResources {
    /// No resources.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    fn push(&mut self, resource: AffectedResource) {
        if !self.0.contains(&resource) {
            self.0.push(resource);
        }
    }

    /// Returns true if `resource` is in the set.
    #[must_use]
    pub fn contains(&self, resource: &AffectedResource) -> bool {
        self.0.contains(resource)
    }

    /// Iterates over the resources.
    pub fn iter(&self) -> impl Iterator<Item = &AffectedResource> {
        self.0.iter()
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was affected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a AffectedResources {
    type Item = &'a AffectedResource;
    type IntoIter = std::slice::Iter<'a, AffectedResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// What a transition did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReceipt {
    /// Operation applied.
    pub operation: OrderOperation,
    /// Status before.
    pub from: OrderStatus,
    /// Status after.
    pub to: OrderStatus,
    /// False for idempotent repeats.
    pub changed: bool,
    /// Resources to refresh.
    pub affected: AffectedResources,
}

/// Trade order aggregate root.
///
/// # Invariants
///
/// - Seller and buyer are different companies
/// - The payload kind matches the order type
/// - The trade path never changes
/// - Quantity and price change only while preparing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    path: TradePath,
    status: OrderStatus,
    src_company: CompanyRef,
    dst_company: CompanyRef,
    order_type: OrderType,
    payload: OrderPayload,
    price: Option<PriceSpec>,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Opens a new order in the preparing status of `path`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if seller and buyer are the
    /// same company, the payload does not fit the order type or the
    /// quantity is negative.
    pub fn new(
        path: TradePath,
        src_company: CompanyRef,
        dst_company: CompanyRef,
        order_type: OrderType,
        payload: OrderPayload,
    ) -> DomainResult<Self> {
        if src_company.id == dst_company.id {
            return Err(DomainError::validation(
                "seller and buyer must be different companies",
            ));
        }
        if !payload.fits(order_type) {
            return Err(DomainError::validation(format!(
                "{order_type} order cannot carry this payload"
            )));
        }
        ensure_quantity(payload.line().quantity)?;

        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::new_v4(),
            path,
            status: OrderStatus::preparing(path),
            src_company,
            dst_company,
            order_type,
            payload,
            price: None,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds an order from storage without validation.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: OrderId,
        path: TradePath,
        status: OrderStatus,
        src_company: CompanyRef,
        dst_company: CompanyRef,
        order_type: OrderType,
        payload: OrderPayload,
        price: Option<PriceSpec>,
        version: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            path,
            status,
            src_company,
            dst_company,
            order_type,
            payload,
            price,
            version,
            created_at,
            updated_at,
        }
    }

    // ========== Accessors ==========

    /// Returns the order ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the trade path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> TradePath {
        self.path
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the seller.
    #[inline]
    #[must_use]
    pub fn src_company(&self) -> &CompanyRef {
        &self.src_company
    }

    /// Returns the buyer.
    #[inline]
    #[must_use]
    pub fn dst_company(&self) -> &CompanyRef {
        &self.dst_company
    }

    /// Returns the order type.
    #[inline]
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Returns the payload.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &OrderPayload {
        &self.payload
    }

    /// Returns the paper spec.
    #[inline]
    #[must_use]
    pub fn spec(&self) -> &PaperSpec {
        &self.payload.line().spec
    }

    /// Returns the canonical quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        self.payload.line().quantity
    }

    /// Returns the linked plan, if any.
    #[inline]
    #[must_use]
    pub fn plan_id(&self) -> Option<PlanId> {
        self.payload.line().plan_id
    }

    /// Returns the pricing, if set.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Option<&PriceSpec> {
        self.price.as_ref()
    }

    /// Returns the version for optimistic locking.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the order was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the order was last changed.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========== Parties ==========

    /// Role of `company` on this order.
    #[must_use]
    pub fn role_of(&self, company: &CompanyId) -> PartyRole {
        if *company == self.src_company.id {
            PartyRole::Seller
        } else if *company == self.dst_company.id {
            PartyRole::Buyer
        } else {
            PartyRole::Outsider
        }
    }

    /// The side that did not open the deal.
    #[must_use]
    pub fn counterparty(&self) -> &CompanyRef {
        match self.path {
            TradePath::Offer => &self.dst_company,
            TradePath::Order => &self.src_company,
        }
    }

    /// Transition context for `caller`.
    #[must_use]
    pub fn transition_context(&self, caller: &CompanyId) -> TransitionContext {
        TransitionContext::new(self.role_of(caller), self.counterparty().is_managed)
    }

    /// Actions `caller` can take now.
    #[must_use]
    pub fn legal_operations(&self, caller: &CompanyId) -> Vec<ExposedAction> {
        legal_operations(self.status, &self.transition_context(caller))
    }

    // ========== Transitions ==========

    /// Applies a workflow operation on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalTransition` or `DomainError::NotPermitted`
    /// from the state machine. The order is untouched on error.
    pub fn apply(
        &mut self,
        operation: OrderOperation,
        caller: &CompanyId,
    ) -> DomainResult<TransitionReceipt> {
        let outcome = transition(self.status, operation, &self.transition_context(caller))?;

        let affected = if outcome.changed {
            self.status = outcome.to;
            self.touch();
            let mut affected = self.base_affected();
            if outcome.to == OrderStatus::Accepted || outcome.from == OrderStatus::Accepted {
                if let Some(plan_id) = self.plan_id() {
                    affected.push(AffectedResource::Plan(plan_id));
                }
            }
            affected
        } else {
            AffectedResources::none()
        };

        Ok(TransitionReceipt {
            operation,
            from: outcome.from,
            to: outcome.to,
            changed: outcome.changed,
            affected,
        })
    }

    /// Sends the order to the counterparty.
    ///
    /// # Errors
    ///
    /// See [`Order::apply`].
    pub fn request(&mut self, caller: &CompanyId) -> DomainResult<TransitionReceipt> {
        self.apply(OrderOperation::Request, caller)
    }

    /// Accepts a request, or registers directly against a virtual counterparty.
    ///
    /// # Errors
    ///
    /// See [`Order::apply`].
    pub fn accept(&mut self, caller: &CompanyId) -> DomainResult<TransitionReceipt> {
        self.apply(OrderOperation::Accept, caller)
    }

    /// Rejects a request.
    ///
    /// # Errors
    ///
    /// See [`Order::apply`].
    pub fn reject(&mut self, caller: &CompanyId) -> DomainResult<TransitionReceipt> {
        self.apply(OrderOperation::Reject, caller)
    }

    /// Reopens a rejected order for editing.
    ///
    /// # Errors
    ///
    /// See [`Order::apply`].
    pub fn reset(&mut self, caller: &CompanyId) -> DomainResult<TransitionReceipt> {
        self.apply(OrderOperation::Reset, caller)
    }

    /// Cancels the order.
    ///
    /// # Errors
    ///
    /// See [`Order::apply`].
    pub fn cancel(&mut self, caller: &CompanyId) -> DomainResult<TransitionReceipt> {
        self.apply(OrderOperation::Cancel, caller)
    }

    // ========== Edits ==========

    /// Replaces the canonical quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAParty` for an outsider,
    /// `DomainError::NotEditable` outside a preparing status and
    /// `DomainError::ValidationError` for a negative quantity.
    pub fn update_quantity(
        &mut self,
        caller: &CompanyId,
        quantity: Decimal,
    ) -> DomainResult<AffectedResources> {
        self.ensure_editable(caller)?;
        ensure_quantity(quantity)?;
        self.payload.line_mut().quantity = quantity;
        self.touch();
        Ok(self.base_affected())
    }

    /// Replaces the pricing, re-deriving it against the order's spec.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAParty` for an outsider and
    /// `DomainError::NotEditable` outside a preparing status.
    pub fn update_price(
        &mut self,
        caller: &CompanyId,
        mut price: PriceSpec,
    ) -> DomainResult<AffectedResources> {
        self.ensure_editable(caller)?;
        price.recompute(self.spec());
        self.price = Some(price);
        self.touch();
        Ok(self.base_affected())
    }

    /// All display representations of the quantity.
    #[must_use]
    pub fn converted_quantity(&self) -> Quantity {
        convert_quantity(self.spec(), self.quantity())
    }

    /// Total amount; zero while unpriced.
    #[must_use]
    pub fn supply_amount(&self) -> Decimal {
        self.price
            .map(|price| price.supply_amount(self.spec(), self.quantity()))
            .unwrap_or(Decimal::ZERO)
    }

    fn ensure_editable(&self, caller: &CompanyId) -> DomainResult<()> {
        if !self.role_of(caller).is_party() {
            return Err(DomainError::NotAParty(caller.to_string()));
        }
        if !self.status.is_editable() {
            return Err(DomainError::NotEditable(self.status));
        }
        Ok(())
    }

    fn base_affected(&self) -> AffectedResources {
        let mut affected = AffectedResources::none();
        affected.push(AffectedResource::Order(self.id));
        affected.push(AffectedResource::OrderList(self.src_company.id.clone()));
        affected.push(AffectedResource::OrderList(self.dst_company.id.clone()));
        affected
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
        self.version = self.version.saturating_add(1);
    }
}

fn ensure_quantity(quantity: Decimal) -> DomainResult<()> {
    if quantity < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "quantity must not be negative, got {quantity}"
        )));
    }
    Ok(())
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order({} {} {} -> {}, {})",
            self.id, self.order_type, self.src_company.name, self.dst_company.name, self.status
        )
    }
}
