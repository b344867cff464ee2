//! # Application Services
//!
//! Services that orchestrate domain logic and collaborators.
//!
//! - [`OrderWorkflowService`]: Order operations with the in-flight guard
//! - [`InFlightPolicy`]: Reject or queue overlapping mutations

pub mod order_workflow;

pub use order_workflow::{InFlightPolicy, OrderWorkflowService, WorkflowOutcome};
