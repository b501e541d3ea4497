//! # Market-Ledger Telemetry
//!
//! Structured logging for the marketplace chaincode.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ml_telemetry::{init_subscriber, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_component("chaincode");
//!     init_subscriber(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ML_SERVICE_NAME` | `market-ledger` | Service name in logs |
//! | `ML_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `ML_JSON_LOGS` | `false` | JSON output |
//! | `ML_NETWORK` | `dev` | Network identifier |

#![warn(missing_docs)]

mod config;
mod logging;
mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::{init_subscriber, init_test_subscriber};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience macro for creating a span with component context.
///
/// ```rust,ignore
/// let _span = ml_telemetry::component_span!("create_order", component = "chaincode").entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
