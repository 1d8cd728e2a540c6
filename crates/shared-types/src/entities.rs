//! # Core Identity Types
//!
//! Caller identity and the scalar units used by every registry.
//!
//! ## Units
//!
//! - **Amounts** are `u128` in the smallest currency unit. Budgets and
//!   disbursements never go negative, so the type forbids it.
//! - **Timestamps** are unix seconds supplied by the host at apply time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a research area (funding bucket).
pub type ResearchAreaId = u64;

/// Money in the smallest currency unit.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// A 20-byte Ethereum-style caller address.
///
/// The ledger makes no assumption about whether the address is an end-user
/// key or a relayed smart account; authorization is purely address based.
/// Serialized as a `0x`-prefixed hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. Never a valid principal.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Address made of one repeated byte. Handy for fixtures.
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Failure to parse an address from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Not valid hex.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    /// Decoded to the wrong number of bytes.
    #[error("Address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        let array: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}
