//! Contract Logic for Token Accounting & Exchange Custody
//!
//! This crate implements the contract layer for the exchange: a fungible
//! token ledger with delegated-spending allowances, and the custodial
//! exchange that holds ether and token deposits on behalf of users.
//!
//! # Modules
//! - `events`: Contract events (Transfer, Approval, Deposit, Withdraw)
//! - `errors`: Contract-specific error types
//! - `security`: Reentrancy guard shared by state-changing operations
//! - `token`: FungibleAsset interface and the AssetToken implementation
//! - `exchange`: Custodial per-user, per-asset balance ledger
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod errors;
pub mod events;
pub mod security;
pub mod token;
pub mod exchange;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
