use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::DEFAULT_DIFFICULTY;
use super::ledger::Balances;
use crate::error::Result;
use crate::transaction::Transaction;

/// Which block fields the proof-of-work seal covers.
///
/// `Header` seals only `index` and `timestamp`: balances, transactions and
/// the previous hash are attached after mining and are not protected by the
/// stored hash. `Full` also covers `previous_hash`, `transactions` and the
/// reconciled `balances`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SealScope {
    #[default]
    Header,
    Full,
}

/// Fields known to the block factory at sealing time.
pub struct SealInput<'a> {
    pub index: u64,
    pub timestamp: &'a DateTime<Utc>,
    pub previous_hash: &'a str,
    pub transactions: &'a [Transaction],
    pub balances: &'a Balances,
}

#[derive(Serialize)]
struct HeaderContent<'a> {
    index: u64,
    timestamp: &'a DateTime<Utc>,
}

#[derive(Serialize)]
struct FullContent<'a> {
    index: u64,
    timestamp: &'a DateTime<Utc>,
    previous_hash: &'a str,
    transactions: &'a [Transaction],
    balances: &'a Balances,
}

impl SealScope {
    /// Canonical bytes for the sealed content. Going through `serde_json::Value`
    /// sorts object keys, so equal content always encodes identically.
    pub fn encode(&self, input: &SealInput<'_>) -> Result<Vec<u8>> {
        let value = match self {
            SealScope::Header => serde_json::to_value(HeaderContent {
                index: input.index,
                timestamp: input.timestamp,
            })?,
            SealScope::Full => serde_json::to_value(FullContent {
                index: input.index,
                timestamp: input.timestamp,
                previous_hash: input.previous_hash,
                transactions: input.transactions,
                balances: input.balances,
            })?,
        };
        Ok(serde_json::to_vec(&value)?)
    }
}

/// Result of a successful nonce search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seal {
    pub nonce: u64,
    pub hash: String,
}

/// Brute-force SHA-256 puzzle: find the first nonce whose
/// `sha256(content || nonce)` hex digest starts with the difficulty prefix.
#[derive(Debug, Clone)]
pub struct ProofOfWork {
    prefix: String,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    /// `difficulty` is the number of leading hex zeros.
    pub fn new(difficulty: usize) -> Self {
        Self {
            prefix: "0".repeat(difficulty),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn meets_difficulty(&self, hash: &str) -> bool {
        hash.starts_with(&self.prefix)
    }

    /// Hex digest of `content` followed by the decimal nonce.
    pub fn digest(content: &[u8], nonce: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hasher.update(nonce.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Search without an upper bound; blocks the calling thread until the
    /// first qualifying nonce is found.
    pub fn mine(&self, content: &[u8]) -> Seal {
        let mut nonce: u64 = 0;
        loop {
            let hash = Self::digest(content, nonce);
            if self.meets_difficulty(&hash) {
                return Seal { nonce, hash };
            }
            nonce += 1;
        }
    }
}
