use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by the ledger to its callers.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid transaction {sender} -> {receiver} ({amount}): {reason}")]
    InvalidTransaction {
        sender: String,
        receiver: String,
        amount: Decimal,
        reason: &'static str,
    },

    #[error("invalid credit for {receiver} ({amount}): amount must be greater than zero")]
    InvalidCredit { receiver: String, amount: Decimal },

    #[error("insufficient funds for {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("balance of {account} would exceed the representable amount")]
    AmountOverflow { account: String },

    #[error("blockchain is not valid, mining refused")]
    ChainCorrupted,

    #[error("block content encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
