//! Contract-specific error types
//!
//! Error taxonomy for token and exchange operations. Every error is a
//! rejection of the whole operation: state is left exactly as it was
//! before the call.

use thiserror::Error;
use types::units::Amount;

/// Token-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Insufficient allowance: required {required}, remaining {remaining}")]
    InsufficientAllowance { required: Amount, remaining: Amount },

    #[error("Invalid recipient: the zero identity cannot receive transfers")]
    InvalidRecipient,

    #[error("Invalid spender: the zero identity cannot be approved")]
    InvalidSpender,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Exchange-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Invalid asset: {token} is not a token address for this operation")]
    InvalidAsset { token: String },

    #[error("Insufficient balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: Amount,
        available: Amount,
    },

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Unsupported operation: bare value transfers are rejected")]
    UnsupportedOperation,

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_display() {
        let err = TokenError::InsufficientBalance {
            required: 100,
            available: 7,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: required 100, available 7"
        );
    }

    #[test]
    fn test_allowance_error_display() {
        let err = TokenError::InsufficientAllowance {
            required: 50,
            remaining: 10,
        };
        assert!(err.to_string().contains("remaining 10"));
    }

    #[test]
    fn test_exchange_error_from_token() {
        let token_err = TokenError::InvalidRecipient;
        let exchange_err: ExchangeError = token_err.into();
        assert!(matches!(exchange_err, ExchangeError::Token(_)));
    }

    #[test]
    fn test_invalid_asset_display() {
        let err = ExchangeError::InvalidAsset {
            token: "00000000-0000-0000-0000-000000000000".to_string(),
        };
        assert!(err.to_string().starts_with("Invalid asset"));
    }
}
