pub mod block;
pub mod ledger;
pub mod model;
pub mod pow;

pub use block::Block;
pub use ledger::Balances;
pub use model::Blockchain;
pub use pow::{ProofOfWork, SealScope};

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: usize = 5;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";
