//! # Ledger Configuration
//!
//! Runtime parameters of the funding ledger.
//!
//! ## Security Requirements
//!
//! - Neither principal may be the zero address.
//! - The milestone tracker address MUST differ from the super-admin: it is
//!   the only address the project registry accepts fund credits from.

use shared_types::{Address, AddressParseError};
use thiserror::Error;
use tracing::info;

/// Environment variable holding the super-admin address.
pub const ENV_SUPER_ADMIN: &str = "RF_SUPER_ADMIN";
/// Environment variable holding the milestone tracker address.
pub const ENV_MILESTONE_TRACKER: &str = "RF_MILESTONE_TRACKER";
/// Environment variable holding the command queue capacity.
pub const ENV_COMMAND_QUEUE: &str = "RF_COMMAND_QUEUE";
/// Environment variable holding the event bus capacity.
pub const ENV_EVENT_BUS_CAPACITY: &str = "RF_EVENT_BUS_CAPACITY";

/// Complete ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Principals of the ledger.
    pub principals: PrincipalConfig,
    /// Single-writer service parameters.
    pub service: ServiceConfig,
}

/// Addresses fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalConfig {
    /// Deployer; may add admins and set the milestone authority.
    pub super_admin: Address,
    /// Identity the milestone tracker credits funds as.
    pub milestone_tracker: Address,
}

impl Default for PrincipalConfig {
    fn default() -> Self {
        Self {
            super_admin: Address::repeat_byte(0x01),
            milestone_tracker: Address::repeat_byte(0xfe),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Commands buffered before callers wait.
    pub command_queue: usize,
    /// Events buffered per bus subscriber before it lags.
    pub event_bus_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            command_queue: 256,
            event_bus_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            principals: PrincipalConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A principal is the zero address.
    #[error("{0} must not be the zero address")]
    ZeroPrincipal(&'static str),

    /// Milestone tracker and super-admin share an address.
    #[error("Milestone tracker address must differ from the super-admin")]
    SharedPrincipal,

    /// A capacity is zero.
    #[error("{0} must be positive")]
    ZeroCapacity(&'static str),

    /// An address variable did not parse.
    #[error("{var}: {source}")]
    InvalidAddress {
        /// Variable name
        var: &'static str,
        /// Parse failure
        source: AddressParseError,
    },

    /// A numeric variable did not parse.
    #[error("{var}: invalid number {value:?}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

impl LedgerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through `lookup` (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SUPER_ADMIN) {
            config.principals.super_admin = parse_address(ENV_SUPER_ADMIN, &raw)?;
            info!(super_admin = %config.principals.super_admin, "Loaded super-admin from environment");
        }
        if let Some(raw) = lookup(ENV_MILESTONE_TRACKER) {
            config.principals.milestone_tracker = parse_address(ENV_MILESTONE_TRACKER, &raw)?;
            info!(
                milestone_tracker = %config.principals.milestone_tracker,
                "Loaded milestone tracker address from environment"
            );
        }
        if let Some(raw) = lookup(ENV_COMMAND_QUEUE) {
            config.service.command_queue = parse_number(ENV_COMMAND_QUEUE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_EVENT_BUS_CAPACITY) {
            config.service.event_bus_capacity = parse_number(ENV_EVENT_BUS_CAPACITY, &raw)?;
        }

        Ok(config)
    }

    /// Check the configuration before the ledger starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.principals.super_admin.is_zero() {
            return Err(ConfigError::ZeroPrincipal("super-admin"));
        }
        if self.principals.milestone_tracker.is_zero() {
            return Err(ConfigError::ZeroPrincipal("milestone tracker"));
        }
        if self.principals.super_admin == self.principals.milestone_tracker {
            return Err(ConfigError::SharedPrincipal);
        }
        if self.service.command_queue == 0 {
            return Err(ConfigError::ZeroCapacity("command queue"));
        }
        if self.service.event_bus_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("event bus capacity"));
        }
        Ok(())
    }
}

fn parse_address(var: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|source| ConfigError::InvalidAddress { var, source })
}

fn parse_number(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}
