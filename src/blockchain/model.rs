use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::time::Instant;

use super::ledger::{self, Balances};
use super::pow::{ProofOfWork, SealScope};
use super::{Block, GENESIS_PREVIOUS_HASH};
use crate::error::{LedgerError, Result};
use crate::transaction::{BalanceCredit, Transaction, TransactionPool};

/// In-memory chain with its pending pool and the snapshot copy taken after
/// every successful mine.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    snapshot: Vec<Block>,
    pool: TransactionPool,
    pow: ProofOfWork,
    scope: SealScope,
}

impl Blockchain {
    /// Initialize a new blockchain with a mined genesis block.
    pub fn new(pow: ProofOfWork, scope: SealScope) -> Result<Self> {
        let mut bc = Self {
            chain: Vec::new(),
            snapshot: Vec::new(),
            pool: TransactionPool::new(),
            pow,
            scope,
        };
        let genesis = bc.create_block(Balances::new(), GENESIS_PREVIOUS_HASH.to_string())?;
        debug!("GENESIS - hash={} nonce={}", genesis.hash, genesis.nonce);
        bc.chain.push(genesis);
        bc.snapshot = bc.chain.clone();
        Ok(bc)
    }

    /// Chain with `difficulty` leading zeros, sealing only the block header.
    #[cfg(test)]
    pub fn with_difficulty(difficulty: usize) -> Result<Self> {
        Self::new(ProofOfWork::new(difficulty), SealScope::default())
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Index the next mined block is expected to get. Nothing is reserved.
    pub fn next_index(&self) -> u64 {
        self.last_block().index + 1
    }

    /// Queue a transfer for the next block.
    pub fn enqueue_transaction(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: Decimal,
    ) -> Result<u64> {
        let tx = Transaction::new(sender, receiver, amount)
            .inspect_err(|e| warn!("POOL - rejected: {e}"))?;
        debug!("POOL - {} -> {} ({})", tx.sender, tx.receiver, tx.amount);
        self.pool.push_transaction(tx);
        Ok(self.next_index())
    }

    /// Queue a direct credit for the next block, replacing any earlier
    /// pending credit for the same account.
    pub fn enqueue_credit(&mut self, receiver: impl Into<String>, amount: Decimal) -> Result<u64> {
        let credit =
            BalanceCredit::new(receiver, amount).inspect_err(|e| warn!("POOL - rejected: {e}"))?;
        self.pool.set_credit(credit);
        Ok(self.next_index())
    }

    /// Build the next block from the pending pool. Always drains the pool;
    /// when a sender cannot cover its outgoing total the drained batch is
    /// dropped and no block is produced.
    ///
    /// Reconciliation runs before the nonce search so a `Full` seal can
    /// cover the resulting balances.
    fn create_block(&mut self, carried: Balances, previous_hash: String) -> Result<Block> {
        let index = self.chain.len() as u64 + 1;
        let (transactions, _credits) = self.pool.drain();
        let balances = ledger::reconcile(&transactions, &carried).inspect_err(|e| {
            warn!(
                "MINER - block #{index} discarded, {} transactions dropped: {e}",
                transactions.len()
            )
        })?;
        Block::seal(index, previous_hash, transactions, balances, &self.pow, self.scope)
    }

    /// Mine the pending pool into a new block.
    ///
    /// Fails without appending when the chain does not validate, when a
    /// sender cannot cover its outgoing total, or when a balance would
    /// overflow. In the latter two cases the pending batch is dropped, not
    /// returned to the pool.
    pub fn mine(&mut self) -> Result<Block> {
        if !self.validate_chain() {
            warn!("MINER - refusing to mine on an invalid chain");
            return Err(LedgerError::ChainCorrupted);
        }

        let t0 = Instant::now();
        let tip = self.last_block();
        let previous_hash = tip.hash.clone();
        let carried = match ledger::merge_credits(&tip.balances, self.pool.credits()) {
            Ok(carried) => carried,
            Err(e) => {
                let (dropped, _credits) = self.pool.drain();
                warn!(
                    "MINER - pending credits rejected, {} transactions dropped: {e}",
                    dropped.len()
                );
                return Err(e);
            }
        };

        let block = self.create_block(carried, previous_hash)?;
        self.chain.push(block);
        self.snapshot = self.chain.clone();

        let mined = self.last_block();
        info!(
            "MINER - sealed block #{} (hash={}, nonce={}, txs={}) in {} ms",
            mined.index,
            mined.hash,
            mined.nonce,
            mined.transactions.len(),
            t0.elapsed().as_millis()
        );
        Ok(mined.clone())
    }

    /// Check linkage, agreement with the snapshot copy and the difficulty
    /// prefix for every block after genesis. Stored hashes are compared as-is;
    /// nothing is recomputed.
    pub fn validate_chain(&self) -> bool {
        for (i, pair) in self.chain.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);
            let position = i + 1;

            if current.previous_hash != prev.hash {
                debug!("VALIDATE - block #{} breaks linkage", current.index);
                return false;
            }
            match self.snapshot.get(position) {
                Some(copy) if copy.hash == current.hash => {}
                _ => {
                    debug!("VALIDATE - block #{} disagrees with snapshot", current.index);
                    return false;
                }
            }
            if !self.pow.meets_difficulty(&current.hash) {
                debug!("VALIDATE - block #{} misses difficulty", current.index);
                return false;
            }
        }
        true
    }

    /// Balance of `account` as of the last block; zero when unknown.
    pub fn balance_of(&self, account: &str) -> Decimal {
        self.last_block()
            .balances
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        self.pool.transactions()
    }

    pub fn pending_credits(&self) -> &Balances {
        self.pool.credits()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty_prefix(&self) -> &str {
        self.pow.prefix()
    }

    pub fn seal_scope(&self) -> SealScope {
        self.scope
    }
}
