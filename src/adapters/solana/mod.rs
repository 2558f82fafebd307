pub mod rpc;
pub mod wallet;

pub use rpc::{parse_commitment, SolanaClient};
pub use wallet::{decode_transaction, sign_transaction, WalletError, WalletManager};
