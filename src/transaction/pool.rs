use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::model::{AccountId, BalanceCredit, Transaction};

/// Unconfirmed transactions and credits waiting for the next block.
///
/// Credits are keyed by account and only the latest one survives: crediting
/// the same account twice before a mine replaces the first amount.
#[derive(Debug, Default)]
pub struct TransactionPool {
    transactions: Vec<Transaction>,
    credits: BTreeMap<AccountId, Decimal>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
        debug!("POOL - transaction queued; pending={}", self.transactions.len());
    }

    /// Store a credit for the next block, replacing any earlier pending credit.
    pub fn set_credit(&mut self, credit: BalanceCredit) {
        if let Some(previous) = self.credits.insert(credit.receiver.clone(), credit.amount) {
            debug!(
                "POOL - credit for {} overwritten ({} -> {})",
                credit.receiver, previous, credit.amount
            );
        }
    }

    /// Empty both buffers, handing their contents to the caller.
    pub fn drain(&mut self) -> (Vec<Transaction>, BTreeMap<AccountId, Decimal>) {
        (
            std::mem::take(&mut self.transactions),
            std::mem::take(&mut self.credits),
        )
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn credits(&self) -> &BTreeMap<AccountId, Decimal> {
        &self.credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(from: &str, to: &str, amount: i64) -> Transaction {
        Transaction::new(from, to, Decimal::from(amount)).unwrap()
    }

    #[test]
    fn keeps_transactions_in_arrival_order() {
        let mut pool = TransactionPool::new();
        pool.push_transaction(tx("a", "b", 1));
        pool.push_transaction(tx("b", "c", 2));
        let senders: Vec<_> = pool.transactions().iter().map(|t| t.sender.as_str()).collect();
        assert_eq!(senders, ["a", "b"]);
    }

    #[test]
    fn credit_overwrites_instead_of_accumulating() {
        let mut pool = TransactionPool::new();
        pool.set_credit(BalanceCredit::new("c", Decimal::from(50)).unwrap());
        pool.set_credit(BalanceCredit::new("c", Decimal::from(5)).unwrap());
        assert_eq!(pool.credits().get("c"), Some(&Decimal::from(5)));
        assert_eq!(pool.credits().len(), 1);
    }

    #[test]
    fn drain_empties_both_buffers() {
        let mut pool = TransactionPool::new();
        pool.push_transaction(tx("a", "b", 1));
        pool.set_credit(BalanceCredit::new("a", Decimal::from(9)).unwrap());

        let (txs, credits) = pool.drain();
        assert_eq!(txs.len(), 1);
        assert_eq!(credits.get("a"), Some(&Decimal::from(9)));
        assert!(pool.transactions().is_empty() && pool.credits().is_empty());

        let (txs, credits) = pool.drain();
        assert!(txs.is_empty() && credits.is_empty());
    }
}
