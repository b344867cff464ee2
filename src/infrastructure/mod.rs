//! # Infrastructure Layer
//!
//! - [`persistence`]: Collaborator ports and in-memory implementations
//! - [`config`]: Layered application settings
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod persistence;
pub mod telemetry;
