pub mod model;
pub mod pool;

pub use model::{AccountId, BalanceCredit, Transaction};
pub use pool::TransactionPool;
