//! Balance reconciliation performed when a block is mined.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{LedgerError, Result};
use crate::transaction::{AccountId, Transaction};

pub type Balances = BTreeMap<AccountId, Decimal>;

/// Add `amount` to `account`, failing instead of wrapping past `Decimal::MAX`.
fn credit(balances: &mut Balances, account: &str, amount: Decimal) -> Result<()> {
    let entry = balances.entry(account.to_string()).or_default();
    *entry = entry
        .checked_add(amount)
        .ok_or_else(|| LedgerError::AmountOverflow {
            account: account.to_string(),
        })?;
    Ok(())
}

fn debit(balances: &mut Balances, account: &str, amount: Decimal) -> Result<()> {
    let entry = balances.entry(account.to_string()).or_default();
    *entry = entry
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::AmountOverflow {
            account: account.to_string(),
        })?;
    Ok(())
}

/// Add pending credits on top of the previous block's ledger.
pub fn merge_credits(previous: &Balances, credits: &Balances) -> Result<Balances> {
    let mut merged = previous.clone();
    for (account, amount) in credits {
        credit(&mut merged, account, *amount)?;
    }
    Ok(merged)
}

/// Net outgoing and incoming totals per account, in account order.
fn net_totals(transactions: &[Transaction]) -> Result<(Balances, Balances)> {
    let mut sent = Balances::new();
    let mut received = Balances::new();
    for tx in transactions {
        credit(&mut sent, &tx.sender, tx.amount)?;
        credit(&mut received, &tx.receiver, tx.amount)?;
    }
    Ok((sent, received))
}

/// Apply a block's transactions to the carried-forward balances.
///
/// Every sender is checked before anything is debited, so a rejected block
/// leaves no partial state behind. Senders are debited before receivers are
/// credited.
pub fn reconcile(transactions: &[Transaction], carried: &Balances) -> Result<Balances> {
    let (sent, received) = net_totals(transactions)?;

    if carried.is_empty() {
        if let Some((account, required)) = sent.iter().next() {
            return Err(LedgerError::InsufficientFunds {
                account: account.clone(),
                required: *required,
                available: Decimal::ZERO,
            });
        }
    }

    for (account, required) in &sent {
        let available = carried.get(account).copied().unwrap_or_default();
        if available < *required {
            return Err(LedgerError::InsufficientFunds {
                account: account.clone(),
                required: *required,
                available,
            });
        }
    }

    let mut balances = carried.clone();
    for (account, total) in &sent {
        debit(&mut balances, account, *total)?;
    }
    for (account, total) in &received {
        credit(&mut balances, account, *total)?;
    }
    Ok(balances)
}
