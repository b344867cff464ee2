//! # Persistence Layer
//!
//! Collaborator ports and their in-memory implementations.
//!
//! ## Ports
//!
//! - [`OrderGateway`]: Authoritative order store
//! - [`CompanyDirectory`]: Company identity
//! - [`PackagingCatalog`]: Packaging metadata
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for testing

pub mod in_memory;
pub mod traits;

pub use traits::{
    CompanyDirectory, OrderGateway, PackagingCatalog, RepositoryError, RepositoryResult,
    TransitionResult,
};
