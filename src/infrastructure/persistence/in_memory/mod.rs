//! # In-Memory Collaborators
//!
//! In-memory implementations for testing without a backend.
//!
//! - [`InMemoryOrderGateway`]: Versioned order store
//! - [`InMemoryCompanyDirectory`]: Companies and the current session
//! - [`InMemoryPackagingCatalog`]: Packaging records

pub mod company_directory;
pub mod order_gateway;
pub mod packaging_catalog;

pub use company_directory::InMemoryCompanyDirectory;
pub use order_gateway::InMemoryOrderGateway;
pub use packaging_catalog::InMemoryPackagingCatalog;
