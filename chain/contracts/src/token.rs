//! AssetToken — fungible-asset ledger with delegated-spending allowances
//!
//! Implements the minimal fungible-asset contract the exchange depends on:
//! - Owner balances with a fixed total supply (no mint/burn)
//! - Absolute-set spender allowances
//! - Direct and delegated transfers with overflow protection
//!
//! The exchange only ever sees tokens through the [`FungibleAsset`]
//! capability interface, so alternative implementations (fakes, adversarial
//! tokens) can be substituted in tests.

use std::collections::HashMap;

use types::ids::Address;
use types::units::{tokens, Amount};

use crate::errors::TokenError;
use crate::events::{Approval, ContractEvent, Transfer};

/// Capability interface for any fungible asset the exchange can custody.
///
/// Caller identity is an explicit parameter: the host environment resolves
/// who is invoking the operation and passes it through.
pub trait FungibleAsset {
    /// Total supply in smallest units. Constant for the contract lifetime.
    fn total_supply(&self) -> Amount;

    /// Balance of a holder. Zero for unknown identities.
    fn balance_of(&self, who: &Address) -> Amount;

    /// Remaining amount `spender` may pull from `owner`.
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Move `amount` from the caller to `to`.
    fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<ContractEvent, TokenError>;

    /// Set the caller's allowance for `spender` to exactly `amount`.
    fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<ContractEvent, TokenError>;

    /// Move `amount` from `from` to `to`, spending the caller's allowance.
    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<ContractEvent, TokenError>;
}

/// Token metadata, fixed at construction.
pub const TOKEN_NAME: &str = "SweenDoge";
/// Token ticker symbol.
pub const TOKEN_SYMBOL: &str = "SWE";
/// Implied decimal places.
pub const TOKEN_DECIMALS: u32 = 18;
/// Fixed supply: 1,000,000 whole tokens in smallest units.
pub const TOKEN_SUPPLY_WHOLE: u64 = 1_000_000;

/// Reference fungible-asset ledger.
///
/// Balances are stored as `HashMap<Address, Amount>` and allowances as
/// `HashMap<(owner, spender), Amount>`. The full supply is credited to the
/// deployer at construction and conserved thereafter: every transfer debits
/// exactly what it credits.
#[derive(Debug)]
pub struct AssetToken {
    /// This contract's own identity
    address: Address,
    /// Total supply in smallest units, fixed at construction
    total_supply: Amount,
    /// Balances: holder -> amount
    balances: HashMap<Address, Amount>,
    /// Allowances: (owner, spender) -> remaining amount
    allowances: HashMap<(Address, Address), Amount>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl AssetToken {
    /// Deploy a new token, crediting the full supply to `deployer`.
    pub fn new(deployer: Address) -> Self {
        let total_supply = tokens(TOKEN_SUPPLY_WHOLE);
        let mut balances = HashMap::new();
        balances.insert(deployer, total_supply);
        Self {
            address: Address::new(),
            total_supply,
            balances,
            allowances: HashMap::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Metadata ─────────────────────────

    /// This contract's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Token name.
    pub fn name(&self) -> &'static str {
        TOKEN_NAME
    }

    /// Token symbol.
    pub fn symbol(&self) -> &'static str {
        TOKEN_SYMBOL
    }

    /// Implied decimal places.
    pub fn decimals(&self) -> u32 {
        TOKEN_DECIMALS
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

    // ───────────────────────── Internal Moves ─────────────────────────

    /// Move `amount` between holders with underflow/overflow protection.
    ///
    /// Debits before crediting so a self-transfer reads the already-debited
    /// balance and nets to zero. A failure at either end leaves both
    /// balances untouched.
    fn move_balance(
        &mut self,
        from: &Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        self.balances.insert(*from, available - amount);
        match self.balance_of(&to).checked_add(amount) {
            Some(credited) => {
                self.balances.insert(to, credited);
                Ok(())
            }
            None => {
                self.balances.insert(*from, available);
                Err(TokenError::Overflow)
            }
        }
    }
}

impl FungibleAsset for AssetToken {
    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balance_of(&self, who: &Address) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Direct transfer from the caller.
    ///
    /// Zero amounts are permitted and still emit a `Transfer` event.
    fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<ContractEvent, TokenError> {
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }

        self.move_balance(&caller, to, amount)?;

        let event = ContractEvent::Transfer(Transfer {
            from: caller,
            to,
            amount,
        });
        self.events.push(event);
        Ok(event)
    }

    /// Set the caller's allowance for `spender` (absolute set, not additive).
    fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<ContractEvent, TokenError> {
        if spender.is_zero() {
            return Err(TokenError::InvalidSpender);
        }

        self.allowances.insert((caller, spender), amount);

        let event = ContractEvent::Approval(Approval {
            owner: caller,
            spender,
            amount,
        });
        self.events.push(event);
        Ok(event)
    }

    /// Delegated transfer by an approved spender.
    ///
    /// Decrements `allowance[(from, caller)]` by exactly `amount`; an amount
    /// exceeding the remaining allowance is a hard failure, never clamped.
    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<ContractEvent, TokenError> {
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }

        let available = self.balance_of(&from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let remaining = self.allowance(&from, &caller);
        if remaining < amount {
            return Err(TokenError::InsufficientAllowance {
                required: amount,
                remaining,
            });
        }

        self.move_balance(&from, to, amount)?;
        self.allowances.insert((from, caller), remaining - amount);

        let event = ContractEvent::Transfer(Transfer { from, to, amount });
        self.events.push(event);
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy() -> (AssetToken, Address) {
        let deployer = Address::new();
        (AssetToken::new(deployer), deployer)
    }

    // ─── Deployment tests ───

    #[test]
    fn test_tracks_metadata() {
        let (token, _) = deploy();
        assert_eq!(token.name(), "SweenDoge");
        assert_eq!(token.symbol(), "SWE");
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn test_tracks_total_supply() {
        let (token, _) = deploy();
        assert_eq!(token.total_supply(), tokens(1_000_000));
    }

    #[test]
    fn test_assigns_total_supply_to_deployer() {
        let (token, deployer) = deploy();
        assert_eq!(token.balance_of(&deployer), tokens(1_000_000));
    }

    // ─── Transfer tests ───

    #[test]
    fn test_transfer_moves_balances() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();

        token.transfer(deployer, receiver, tokens(100)).unwrap();

        assert_eq!(token.balance_of(&deployer), tokens(999_900));
        assert_eq!(token.balance_of(&receiver), tokens(100));
    }

    #[test]
    fn test_transfer_emits_event() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();

        let event = token.transfer(deployer, receiver, tokens(100)).unwrap();
        assert_eq!(
            event,
            ContractEvent::Transfer(Transfer {
                from: deployer,
                to: receiver,
                amount: tokens(100),
            })
        );
        assert_eq!(token.events().len(), 1);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();

        // 100 million > total supply
        let result = token.transfer(deployer, receiver, tokens(100_000_000));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));

        // Sender with no tokens at all
        let result = token.transfer(receiver, deployer, tokens(10));
        assert_eq!(
            result,
            Err(TokenError::InsufficientBalance {
                required: tokens(10),
                available: 0,
            })
        );
    }

    #[test]
    fn test_transfer_rejects_zero_recipient() {
        let (mut token, deployer) = deploy();
        let result = token.transfer(deployer, Address::ZERO, tokens(1));
        assert_eq!(result, Err(TokenError::InvalidRecipient));
        assert_eq!(token.balance_of(&deployer), tokens(1_000_000));
    }

    #[test]
    fn test_transfer_zero_amount_emits() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        token.transfer(deployer, receiver, 0).unwrap();
        assert_eq!(token.events().len(), 1);
        assert_eq!(token.balance_of(&receiver), 0);
    }

    #[test]
    fn test_failed_transfer_emits_nothing() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let _ = token.transfer(receiver, deployer, tokens(1));
        assert!(token.events().is_empty());
    }

    // ─── Approval tests ───

    #[test]
    fn test_approve_sets_allowance() {
        let (mut token, deployer) = deploy();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        assert_eq!(token.allowance(&deployer, &exchange), tokens(100));
    }

    #[test]
    fn test_approve_is_absolute_not_additive() {
        let (mut token, deployer) = deploy();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        token.approve(deployer, exchange, tokens(40)).unwrap();
        assert_eq!(token.allowance(&deployer, &exchange), tokens(40));
    }

    #[test]
    fn test_approve_emits_event() {
        let (mut token, deployer) = deploy();
        let exchange = Address::new();

        let event = token.approve(deployer, exchange, tokens(100)).unwrap();
        assert_eq!(
            event,
            ContractEvent::Approval(Approval {
                owner: deployer,
                spender: exchange,
                amount: tokens(100),
            })
        );
    }

    #[test]
    fn test_approve_rejects_zero_spender() {
        let (mut token, deployer) = deploy();
        let result = token.approve(deployer, Address::ZERO, tokens(100));
        assert_eq!(result, Err(TokenError::InvalidSpender));
    }

    // ─── Delegated transfer tests ───

    #[test]
    fn test_transfer_from_moves_balances() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        token
            .transfer_from(exchange, deployer, receiver, tokens(100))
            .unwrap();

        assert_eq!(token.balance_of(&deployer), tokens(999_900));
        assert_eq!(token.balance_of(&receiver), tokens(100));
    }

    #[test]
    fn test_transfer_from_resets_allowance() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        token
            .transfer_from(exchange, deployer, receiver, tokens(100))
            .unwrap();

        assert_eq!(token.allowance(&deployer, &exchange), 0);
    }

    #[test]
    fn test_transfer_from_partial_allowance_decrement() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        token
            .transfer_from(exchange, deployer, receiver, tokens(30))
            .unwrap();

        assert_eq!(token.allowance(&deployer, &exchange), tokens(70));
    }

    #[test]
    fn test_transfer_from_emits_transfer_event() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        let event = token
            .transfer_from(exchange, deployer, receiver, tokens(100))
            .unwrap();

        assert_eq!(
            event,
            ContractEvent::Transfer(Transfer {
                from: deployer,
                to: receiver,
                amount: tokens(100),
            })
        );
    }

    #[test]
    fn test_transfer_from_insufficient_balance() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        // 1 billion > total supply
        let result =
            token.transfer_from(exchange, deployer, receiver, tokens(1_000_000_000));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_transfer_from_insufficient_allowance() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(10)).unwrap();
        let result = token.transfer_from(exchange, deployer, receiver, tokens(11));
        assert_eq!(
            result,
            Err(TokenError::InsufficientAllowance {
                required: tokens(11),
                remaining: tokens(10),
            })
        );
        // Nothing moved, allowance intact
        assert_eq!(token.balance_of(&receiver), 0);
        assert_eq!(token.allowance(&deployer, &exchange), tokens(10));
    }

    #[test]
    fn test_transfer_from_without_approval() {
        let (mut token, deployer) = deploy();
        let receiver = Address::new();
        let exchange = Address::new();

        let result = token.transfer_from(exchange, deployer, receiver, tokens(1));
        assert_eq!(
            result,
            Err(TokenError::InsufficientAllowance {
                required: tokens(1),
                remaining: 0,
            })
        );
    }

    #[test]
    fn test_transfer_from_rejects_zero_recipient() {
        let (mut token, deployer) = deploy();
        let exchange = Address::new();

        token.approve(deployer, exchange, tokens(100)).unwrap();
        let result = token.transfer_from(exchange, deployer, Address::ZERO, tokens(100));
        assert_eq!(result, Err(TokenError::InvalidRecipient));
    }

    // ─── Conservation ───

    #[test]
    fn test_self_transfer_preserves_balance() {
        let (mut token, deployer) = deploy();
        token.transfer(deployer, deployer, tokens(5)).unwrap();
        assert_eq!(token.balance_of(&deployer), tokens(1_000_000));
    }

    #[test]
    fn test_supply_conserved_across_transfers() {
        let (mut token, deployer) = deploy();
        let a = Address::new();
        let b = Address::new();

        token.transfer(deployer, a, tokens(500)).unwrap();
        token.transfer(a, b, tokens(200)).unwrap();
        token.transfer(b, deployer, tokens(50)).unwrap();

        let sum = token.balance_of(&deployer) + token.balance_of(&a) + token.balance_of(&b);
        assert_eq!(sum, token.total_supply());
    }
}
