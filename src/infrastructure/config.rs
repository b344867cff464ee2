//! # Application Configuration
//!
//! Layered settings loaded with the `config` crate:
//!
//! ```text
//! config/default.{toml,json,yaml}   base values
//! config/{PAPER_ENV}                environment overrides (development, production, ...)
//! config/local                      untracked developer overrides
//! PAPER__SECTION__KEY               environment variables
//! ```
//!
//! A `.env` file is read first with `dotenvy`, so environment overrides can
//! live there during development. Every file is optional; missing sections
//! fall back to defaults.

use crate::application::error::InfrastructureError;
use crate::application::services::order_workflow::InFlightPolicy;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PAPER";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Order workflow settings.
    #[serde(default)]
    pub workflow: WorkflowSettings,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Order workflow settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    /// What to do with a transition while another is pending on the same order.
    #[serde(default)]
    pub in_flight_policy: InFlightPolicy,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            json: false,
            level: default_level(),
        }
    }
}

impl AppConfig {
    /// Loads settings from `config/` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if a present source is malformed.
    pub fn load() -> Result<Self, InfrastructureError> {
        // a missing .env is fine
        let _ = dotenvy::dotenv();
        let run_mode = std::env::var("PAPER_ENV").unwrap_or_else(|_| "development".into());
        let config_dir = std::env::var("PAPER_CONFIG_DIR").unwrap_or_else(|_| "config".into());
        Self::load_from(&config_dir, &run_mode)
    }

    /// Loads settings from an explicit directory and run mode.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if a present source is malformed.
    pub fn load_from(config_dir: &str, run_mode: &str) -> Result<Self, InfrastructureError> {
        let config = Config::builder()
            .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
            .add_source(File::with_name(&format!("{config_dir}/{run_mode}")).required(false))
            .add_source(File::with_name(&format!("{config_dir}/local")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
