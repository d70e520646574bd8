//! Types library for the custodial exchange ledger
//!
//! This library provides the core type definitions shared by the contract
//! layer, ensuring type safety and deterministic integer arithmetic.
//!
//! # Modules
//! - `ids`: Participant identifiers (Address) with the reserved zero identity
//! - `units`: Integer asset amounts in smallest indivisible units

// Public modules
pub mod ids;
pub mod units;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::units::*;
}
