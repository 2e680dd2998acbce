use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::blockchain::{Balances, Block, Blockchain};
use crate::transaction::Transaction;

/// Shared application state. Every mutation goes through the write guard,
/// so a mine never overlaps an enqueue or another mine.
pub struct AppState {
    pub ledger: RwLock<Blockchain>,
}

impl AppState {
    pub fn new(blockchain: Blockchain) -> Self {
        Self {
            ledger: RwLock::new(blockchain),
        }
    }
}

/* ---------- Pool API Models ---------- */

#[derive(Deserialize)]
pub struct TransactionRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: Decimal,
}

#[derive(Deserialize)]
pub struct CreditRequest {
    pub receiver: String,
    pub amount: Decimal,
}

#[derive(Serialize)]
pub struct EnqueueResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub pending_transactions: &'a [Transaction],
    pub pending_credits: &'a Balances,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: &'static str,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub block: Block,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub account: String,
    pub balance: Decimal,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
