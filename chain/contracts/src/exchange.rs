//! Exchange — custodial per-user, per-asset balance ledger
//!
//! Holds ether and token deposits on behalf of users:
//! - Ether deposits as direct value transfers bundled with the call
//! - Token deposits pulled via a pre-approved delegated transfer
//! - Withdrawals that debit the ledger before any external interaction
//! - Fee configuration fixed at construction (queryable, not yet debited)
//!
//! Every state-changing operation is a single atomic transition: it either
//! commits fully or rejects with no observable effect. Operations follow
//! checks → effects → external interaction, with a reentrancy guard held
//! for the duration.

use std::collections::HashMap;

use types::ids::Address;
use types::units::Amount;

use crate::errors::ExchangeError;
use crate::events::{ContractEvent, Deposit, Withdraw};
use crate::security::ReentrancyGuard;
use crate::token::FungibleAsset;

/// Sentinel asset key for the base asset inside the balance mapping.
///
/// The zero identity can never be a real token contract, so it doubles as
/// the well-known ether marker.
pub const ETHER_ADDRESS: Address = Address::ZERO;

/// Custodial exchange ledger.
///
/// Balances are stored as `HashMap<Address, HashMap<Address, Amount>>`
/// where the outer key is the asset ([`ETHER_ADDRESS`] or a token
/// contract's address) and the inner key is the user.
#[derive(Debug)]
pub struct Exchange {
    /// This contract's own identity (the recipient of delegated pulls)
    address: Address,
    /// Fee recipient, fixed at construction
    fee_account: Address,
    /// Fee rate in percent, fixed at construction. Stored and queryable;
    /// no current operation debits it.
    fee_percent: u64,
    /// Balances: asset -> (user -> amount)
    balances: HashMap<Address, HashMap<Address, Amount>>,
    /// Ether actually held (mirrors the host account balance)
    ether_reserve: Amount,
    /// Security: reentrancy guard
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl Exchange {
    /// Deploy a new exchange with its fee configuration.
    pub fn new(fee_account: Address, fee_percent: u64) -> Self {
        Self {
            address: Address::new(),
            fee_account,
            fee_percent,
            balances: HashMap::new(),
            ether_reserve: 0,
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Queries ─────────────────────────

    /// This contract's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Configured fee recipient.
    pub fn fee_account(&self) -> Address {
        self.fee_account
    }

    /// Configured fee rate in percent.
    pub fn fee_percent(&self) -> u64 {
        self.fee_percent
    }

    /// Ether actually held by the exchange.
    pub fn ether_reserve(&self) -> Amount {
        self.ether_reserve
    }

    /// Custodial balance for an (asset, user) pair.
    /// Zero for unknown combinations; never fails.
    pub fn balance_of(&self, token: &Address, user: &Address) -> Amount {
        self.balances
            .get(token)
            .and_then(|users| users.get(user))
            .copied()
            .unwrap_or(0)
    }

    // ───────────────────────── Ether Deposit ─────────────────────────

    /// Deposit ether: the caller attaches `value` to the call.
    ///
    /// Emits `Deposit` with the caller's post-deposit total.
    pub fn deposit_ether(
        &mut self,
        caller: Address,
        value: Amount,
    ) -> Result<ContractEvent, ExchangeError> {
        self.check_reentrancy()?;

        let new_balance = match self.checked_credit(ETHER_ADDRESS, caller, value) {
            Ok(b) => b,
            Err(e) => {
                self.reentrancy_guard.release();
                return Err(e);
            }
        };
        let new_reserve = match self.ether_reserve.checked_add(value) {
            Some(r) => r,
            None => {
                self.reentrancy_guard.release();
                return Err(ExchangeError::Overflow);
            }
        };

        self.set_balance(ETHER_ADDRESS, caller, new_balance);
        self.ether_reserve = new_reserve;

        let event = ContractEvent::Deposit(Deposit {
            token: ETHER_ADDRESS,
            user: caller,
            amount: value,
            balance: new_balance,
        });
        self.events.push(event);
        self.reentrancy_guard.release();
        Ok(event)
    }

    /// Bare value transfer outside `deposit_ether`: always rejected.
    pub fn fallback(&self, _from: Address, _value: Amount) -> Result<(), ExchangeError> {
        Err(ExchangeError::UnsupportedOperation)
    }

    // ───────────────────────── Token Deposit ─────────────────────────

    /// Deposit tokens pulled from the caller via delegated transfer.
    ///
    /// The caller must have pre-approved this exchange for at least
    /// `amount`; a failed pull (insufficient balance or allowance)
    /// propagates and leaves the ledger untouched.
    pub fn deposit_token(
        &mut self,
        token: &mut dyn FungibleAsset,
        token_address: Address,
        caller: Address,
        amount: Amount,
    ) -> Result<ContractEvent, ExchangeError> {
        self.check_reentrancy()?;

        if token_address == ETHER_ADDRESS {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InvalidAsset {
                token: token_address.to_string(),
            });
        }

        // Validate the credit before pulling so the pull never needs undoing
        let new_balance = match self.checked_credit(token_address, caller, amount) {
            Ok(b) => b,
            Err(e) => {
                self.reentrancy_guard.release();
                return Err(e);
            }
        };

        // External pull: caller -> exchange
        if let Err(e) = token.transfer_from(self.address, caller, self.address, amount) {
            self.reentrancy_guard.release();
            return Err(ExchangeError::Token(e));
        }

        self.set_balance(token_address, caller, new_balance);

        let event = ContractEvent::Deposit(Deposit {
            token: token_address,
            user: caller,
            amount,
            balance: new_balance,
        });
        self.events.push(event);
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Withdrawals ─────────────────────────

    /// Withdraw ether back to the caller.
    ///
    /// The ledger balance and reserve are debited before the host performs
    /// the outbound value transfer.
    pub fn withdraw_ether(
        &mut self,
        caller: Address,
        amount: Amount,
    ) -> Result<ContractEvent, ExchangeError> {
        self.check_reentrancy()?;

        let new_balance = match self.checked_debit(ETHER_ADDRESS, caller, amount) {
            Ok(b) => b,
            Err(e) => {
                self.reentrancy_guard.release();
                return Err(e);
            }
        };

        // Solvency invariant: reserve covers every ledger balance
        let new_reserve = match self.ether_reserve.checked_sub(amount) {
            Some(r) => r,
            None => {
                self.reentrancy_guard.release();
                return Err(ExchangeError::Overflow);
            }
        };

        self.set_balance(ETHER_ADDRESS, caller, new_balance);
        self.ether_reserve = new_reserve;

        let event = ContractEvent::Withdraw(Withdraw {
            token: ETHER_ADDRESS,
            user: caller,
            amount,
            balance: new_balance,
        });
        self.events.push(event);
        self.reentrancy_guard.release();
        Ok(event)
    }

    /// Withdraw tokens back to the caller.
    ///
    /// Debits the ledger balance first, then pushes the tokens out of the
    /// exchange's own holdings. A failed outbound transfer rolls the debit
    /// back so no partial effect persists.
    pub fn withdraw_token(
        &mut self,
        token: &mut dyn FungibleAsset,
        token_address: Address,
        caller: Address,
        amount: Amount,
    ) -> Result<ContractEvent, ExchangeError> {
        self.check_reentrancy()?;

        if token_address == ETHER_ADDRESS {
            self.reentrancy_guard.release();
            return Err(ExchangeError::InvalidAsset {
                token: token_address.to_string(),
            });
        }

        let previous = self.balance_of(&token_address, &caller);
        let new_balance = match self.checked_debit(token_address, caller, amount) {
            Ok(b) => b,
            Err(e) => {
                self.reentrancy_guard.release();
                return Err(e);
            }
        };

        // Effects before interaction
        self.set_balance(token_address, caller, new_balance);

        // External push: exchange -> caller
        if let Err(e) = token.transfer(self.address, caller, amount) {
            // Full rollback: restore the staged debit
            self.set_balance(token_address, caller, previous);
            self.reentrancy_guard.release();
            return Err(ExchangeError::Token(e));
        }

        let event = ContractEvent::Withdraw(Withdraw {
            token: token_address,
            user: caller,
            amount,
            balance: new_balance,
        });
        self.events.push(event);
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Accounting ─────────────────────────

    /// Compute a credited balance with overflow protection. No mutation.
    fn checked_credit(
        &self,
        token: Address,
        user: Address,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        self.balance_of(&token, &user)
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)
    }

    /// Compute a debited balance, rejecting shortfalls. No mutation.
    fn checked_debit(
        &self,
        token: Address,
        user: Address,
        amount: Amount,
    ) -> Result<Amount, ExchangeError> {
        let available = self.balance_of(&token, &user);
        if available < amount {
            return Err(ExchangeError::InsufficientBalance {
                asset: token.to_string(),
                required: amount,
                available,
            });
        }
        Ok(available - amount)
    }

    fn set_balance(&mut self, token: Address, user: Address, amount: Amount) {
        self.balances.entry(token).or_default().insert(user, amount);
    }

    fn check_reentrancy(&mut self) -> Result<(), ExchangeError> {
        if !self.reentrancy_guard.acquire() {
            return Err(ExchangeError::Reentrancy);
        }
        Ok(())
    }
}
