//! # Ledger Configuration
//!
//! Identities and runtime parameters, loaded from the environment.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `PL_OWNER` | `owner` | zero (invalid) |
//! | `PL_OPERATOR` | `operator` | zero (invalid) |
//! | `PL_REGULATOR` | `regulator` | zero (no regulator) |
//! | `PL_ANCHOR_ON_APPROVAL` | `anchor_on_approval` | `true` |
//! | `PL_EVENT_CAPACITY` | `event_channel_capacity` | 1000 |

use crate::hex_codec::{decode_fixed, HexError};
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{is_zero_address, Address, ZERO_ADDRESS};
use thiserror::Error;
use tracing::info;

/// Complete ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Owner of the registry and the notice workflow.
    pub owner: Address,
    /// Registry operator.
    pub operator: Address,
    /// Notice regulator; zero leaves approval unreachable.
    pub regulator: Address,
    /// Attach the anchor store to the notice workflow at startup.
    pub anchor_on_approval: bool,
    /// Broadcast buffer per event subscriber.
    pub event_channel_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            owner: ZERO_ADDRESS,
            operator: ZERO_ADDRESS,
            regulator: ZERO_ADDRESS,
            anchor_on_approval: true,
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An address variable is not 20 bytes of hex.
    #[error("{var}: {source}")]
    BadAddress {
        /// Variable name
        var: &'static str,
        /// Decoding failure
        source: HexError,
    },

    /// A variable could not be parsed.
    #[error("{var}: cannot parse {value:?}")]
    BadValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// A required identity is zero.
    #[error("{0} must be set to a non-zero address")]
    MissingIdentity(&'static str),

    /// Event channel capacity is zero.
    #[error("event channel capacity must be positive")]
    ZeroCapacity,
}

impl LedgerConfig {
    /// Load from the process environment, starting from defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("PL_OWNER") {
            config.owner = parse_address("PL_OWNER", &value)?;
        }
        if let Some(value) = lookup("PL_OPERATOR") {
            config.operator = parse_address("PL_OPERATOR", &value)?;
        }
        if let Some(value) = lookup("PL_REGULATOR") {
            config.regulator = parse_address("PL_REGULATOR", &value)?;
        }
        if let Some(value) = lookup("PL_ANCHOR_ON_APPROVAL") {
            config.anchor_on_approval = parse_value("PL_ANCHOR_ON_APPROVAL", &value)?;
        }
        if let Some(value) = lookup("PL_EVENT_CAPACITY") {
            config.event_channel_capacity = parse_value("PL_EVENT_CAPACITY", &value)?;
        }

        info!(
            anchor_on_approval = config.anchor_on_approval,
            capacity = config.event_channel_capacity,
            "Loaded ledger configuration"
        );
        Ok(config)
    }

    /// Reject configurations the ledger cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_zero_address(&self.owner) {
            return Err(ConfigError::MissingIdentity("owner"));
        }
        if is_zero_address(&self.operator) {
            return Err(ConfigError::MissingIdentity("operator"));
        }
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

fn parse_address(var: &'static str, value: &str) -> Result<Address, ConfigError> {
    decode_fixed(value).map_err(|source| ConfigError::BadAddress { var, source })
}

fn parse_value<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::BadValue {
        var,
        value: value.to_string(),
    })
}
