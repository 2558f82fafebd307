use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    transaction::VersionedTransaction,
};
use spl_token::solana_program::program_pack::Pack;
use std::sync::Arc;

use crate::ports::chain::{ChainError, ChainPort};

/// Wrapper around Solana RPC client with async-compatible methods
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
}

impl SolanaClient {
    /// Create a new Solana RPC client at `confirmed` commitment
    pub fn new(rpc_url: String) -> Self {
        Self::with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    pub fn with_commitment(rpc_url: String, commitment: CommitmentConfig) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, commitment));
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Run a blocking RPC call off the async runtime
    async fn blocking<T, F>(&self, call: F) -> Result<T, ChainError>
    where
        T: Send + 'static,
        F: FnOnce(&RpcClient) -> Result<T, ChainError> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|e| ChainError::RpcError(format!("Task join error: {}", e)))?
    }
}

/// Parse a commitment level name from settings
pub fn parse_commitment(level: &str) -> Option<CommitmentConfig> {
    match level {
        "processed" => Some(CommitmentConfig::processed()),
        "confirmed" => Some(CommitmentConfig::confirmed()),
        "finalized" => Some(CommitmentConfig::finalized()),
        _ => None,
    }
}

/// Only a missing account is `AccountNotFound`; transport and node failures stay `RpcError`
fn lookup_error(account: &Pubkey, error: ClientError) -> ChainError {
    let message = error.to_string();
    if is_missing_account(&message) {
        ChainError::AccountNotFound(account.to_string())
    } else {
        ChainError::RpcError(format!("{}: {}", account, message))
    }
}

fn is_missing_account(message: &str) -> bool {
    message.contains("could not find account") || message.contains("AccountNotFound")
}

#[async_trait]
impl ChainPort for SolanaClient {
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64, ChainError> {
        let owner = *owner;
        self.blocking(move |client| {
            client
                .get_balance(&owner)
                .map_err(|e| ChainError::RpcError(e.to_string()))
        })
        .await
    }

    async fn get_token_account_balance(&self, token_account: &Pubkey) -> Result<u64, ChainError> {
        let token_account = *token_account;
        self.blocking(move |client| {
            let balance = client
                .get_token_account_balance(&token_account)
                .map_err(|e| lookup_error(&token_account, e))?;
            balance
                .amount
                .parse::<u64>()
                .map_err(|e| ChainError::InvalidAccountData(format!("Parse error: {}", e)))
        })
        .await
    }

    async fn get_mint_decimals(&self, mint: &Pubkey) -> Result<u8, ChainError> {
        let mint = *mint;
        self.blocking(move |client| {
            let account = client
                .get_account(&mint)
                .map_err(|e| lookup_error(&mint, e))?;
            let state = spl_token::state::Mint::unpack(&account.data)
                .map_err(|e| ChainError::InvalidAccountData(format!("{} is not a mint: {}", mint, e)))?;
            Ok(state.decimals)
        })
        .await
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<String, ChainError> {
        let tx = transaction.clone();
        self.blocking(move |client| {
            client
                .send_transaction(&tx)
                .map(|sig| sig.to_string())
                .map_err(|e| ChainError::TransactionError(e.to_string()))
        })
        .await
    }
}
