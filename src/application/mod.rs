//! # Application Layer
//!
//! - [`services`]: Order workflow orchestration
//! - [`error`]: Application error types

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
pub use services::{InFlightPolicy, OrderWorkflowService, WorkflowOutcome};
