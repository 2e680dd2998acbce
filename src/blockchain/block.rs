use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ledger::Balances;
use super::pow::{ProofOfWork, SealInput, SealScope};
use crate::error::Result;
use crate::transaction::Transaction;

/// A mined block. `balances` is the full ledger as of this block, not a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    pub nonce: u64,
    pub balances: Balances,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Timestamp the block, run the nonce search over its sealed content and
    /// attach the remaining fields.
    pub fn seal(
        index: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
        balances: Balances,
        pow: &ProofOfWork,
        scope: SealScope,
    ) -> Result<Self> {
        let timestamp = Utc::now();
        let content = scope.encode(&SealInput {
            index,
            timestamp: &timestamp,
            previous_hash: &previous_hash,
            transactions: &transactions,
            balances: &balances,
        })?;
        let seal = pow.mine(&content);

        Ok(Self {
            index,
            timestamp,
            nonce: seal.nonce,
            balances,
            transactions,
            previous_hash,
            hash: seal.hash,
        })
    }

    /// Recompute the digest of the sealed content with the stored nonce.
    #[cfg(test)]
    pub fn compute_hash(&self, scope: SealScope) -> Result<String> {
        let content = scope.encode(&SealInput {
            index: self.index,
            timestamp: &self.timestamp,
            previous_hash: &self.previous_hash,
            transactions: &self.transactions,
            balances: &self.balances,
        })?;
        Ok(ProofOfWork::digest(&content, self.nonce))
    }
}
