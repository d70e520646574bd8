//! Participant identifier types
//!
//! Every user and contract is identified by an opaque `Address`. Addresses
//! use UUID v7 so freshly created identities sort chronologically, and the
//! nil UUID is reserved as the invalid "zero" identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a participant (user or contract).
///
/// The nil UUID is the reserved zero identity: it must never be a transfer
/// recipient, approval spender, or deposit/withdraw target. The exchange
/// also uses it as the base-asset sentinel key (see `contracts`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Uuid);

impl Address {
    /// The reserved zero identity (nil UUID).
    pub const ZERO: Address = Address(Uuid::nil());

    /// Create a fresh unique address with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Check whether this is the reserved zero identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
