//! Integer asset amounts
//!
//! All amounts are unsigned integers denominated in an asset's smallest
//! indivisible unit with 18 implied decimal places. Arithmetic is
//! integer-only; the contract layer uses checked operations so overflow
//! surfaces as an error instead of wrapping.

/// An asset amount in smallest indivisible units.
pub type Amount = u128;

/// Implied decimal places for all assets.
pub const DECIMALS: u32 = 18;

/// Smallest-unit scale factor: 10^18.
pub const UNIT: Amount = 1_000_000_000_000_000_000;

/// Convert a whole-token count into smallest units.
pub fn tokens(n: u64) -> Amount {
    n as Amount * UNIT
}

/// Convert a whole-ether count into smallest units (wei).
///
/// Identical scale to `tokens`; a separate name keeps call sites honest
/// about which asset they mean.
pub fn ether(n: u64) -> Amount {
    n as Amount * UNIT
}
