//! Contract events
//!
//! Events are immutable records appended exactly once per successful
//! state-changing operation. Failed operations never emit.

use serde::{Deserialize, Serialize};
use types::ids::Address;
use types::units::Amount;

/// Token moved between two holders (`transfer` or `transfer_from`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

/// Spender allowance set by an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub amount: Amount,
}

/// Asset credited to a user's custodial exchange balance
///
/// `balance` is the user's post-deposit total for the asset, not the delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub token: Address,
    pub user: Address,
    pub amount: Amount,
    pub balance: Amount,
}

/// Asset debited from a user's custodial exchange balance
///
/// `balance` is the user's post-withdrawal total for the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub token: Address,
    pub user: Address,
    pub amount: Amount,
    pub balance: Amount,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Transfer(Transfer),
    Approval(Approval),
    Deposit(Deposit),
    Withdraw(Withdraw),
}
