use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Opaque account identifier supplied by the user subsystem (an email in practice).
pub type AccountId = String;

/// A pending value transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub amount: Decimal,
}

impl Transaction {
    /// Build a transaction, rejecting non-positive amounts and self-transfers.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: Decimal) -> Result<Self> {
        let tx = Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        };
        if tx.sender == tx.receiver {
            return Err(tx.reject("sender cannot be the same as receiver"));
        }
        if tx.amount <= Decimal::ZERO {
            return Err(tx.reject("amount must be greater than zero"));
        }
        Ok(tx)
    }

    fn reject(self, reason: &'static str) -> LedgerError {
        LedgerError::InvalidTransaction {
            sender: self.sender,
            receiver: self.receiver,
            amount: self.amount,
            reason,
        }
    }
}

/// A direct credit to an account's pending balance. No sender is debited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCredit {
    pub receiver: AccountId,
    pub amount: Decimal,
}

impl BalanceCredit {
    pub fn new(receiver: impl Into<String>, amount: Decimal) -> Result<Self> {
        let receiver = receiver.into();
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidCredit { receiver, amount });
        }
        Ok(Self { receiver, amount })
    }
}
