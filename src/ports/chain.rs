//! Chain Port
//!
//! Narrow view of the Solana RPC node: balances, mint precision and
//! transaction submission.

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("RPC request failed: {0}")]
    RpcError(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),
    #[error("Transaction rejected: {0}")]
    TransactionError(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainPort: Send + Sync {
    /// Native balance in lamports
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64, ChainError>;

    /// Raw token amount held by a token account
    async fn get_token_account_balance(&self, token_account: &Pubkey) -> Result<u64, ChainError>;

    /// Decimal precision of a mint
    async fn get_mint_decimals(&self, mint: &Pubkey) -> Result<u8, ChainError>;

    /// Submit a fully signed transaction, returning its signature
    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<String, ChainError>;
}
