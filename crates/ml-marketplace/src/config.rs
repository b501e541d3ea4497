//! Chaincode configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// How `updateOrderStatus` treats the requested status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Only known statuses along the transition table are accepted.
    #[default]
    Strict,
    /// Any non-empty string is accepted and stored verbatim.
    Permissive,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!("unknown status policy: {other}")),
        }
    }
}

impl fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Permissive => f.write_str("permissive"),
        }
    }
}

/// Marketplace chaincode configuration.
#[derive(Debug, Clone)]
pub struct ChaincodeConfig {
    /// Name used in spans and logs.
    pub chaincode_name: String,

    /// Order status transition policy.
    pub status_policy: StatusPolicy,

    /// Whether query payloads are logged at debug level.
    pub log_payloads: bool,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            chaincode_name: "market-ledger".to_string(),
            status_policy: StatusPolicy::Strict,
            log_payloads: false,
        }
    }
}

impl ChaincodeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ML_CHAINCODE_NAME`: Name in spans and logs (default: market-ledger)
    /// - `ML_STATUS_POLICY`: `strict` or `permissive` (default: strict)
    /// - `ML_LOG_PAYLOADS`: Log query payloads at debug level (default: false)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with variables resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            chaincode_name: lookup("ML_CHAINCODE_NAME").unwrap_or(defaults.chaincode_name),

            status_policy: lookup("ML_STATUS_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.status_policy),

            log_payloads: lookup("ML_LOG_PAYLOADS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.log_payloads),
        }
    }

    /// Source-compatible configuration: any order status is accepted.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            status_policy: StatusPolicy::Permissive,
            ..Self::default()
        }
    }
}
