//! Token Creation Client
//!
//! Uploads metadata, asks the trade API for an unsigned create transaction,
//! co-signs it with a fresh mint keypair and the creator, and submits it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use thiserror::Error;

use crate::adapters::solana::{decode_transaction, sign_transaction, WalletError, WalletManager};
use crate::domain::{MintReferenceFile, RunConfig};
use crate::ports::{ChainError, ChainPort, LaunchpadError, LaunchpadPort, MetadataUpload, TradeRequest};

const DEFAULT_LOGO_NAME: &str = "logo.png";

#[derive(Debug, Error)]
pub enum CreationError {
    #[error("Cannot read logo {path}: {source}")]
    LogoUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Metadata upload failed: {0}")]
    MetadataUpload(#[source] LaunchpadError),
    #[error("Create transaction request failed: {0}")]
    TradeApi(#[source] LaunchpadError),
    #[error("Signing failed: {0}")]
    Signing(#[from] WalletError),
    #[error("Submission failed: {0}")]
    Submission(#[from] ChainError),
}

/// A freshly created token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedToken {
    pub mint: Pubkey,
    pub signature: String,
}

pub struct TokenCreator {
    launchpad: Arc<dyn LaunchpadPort>,
    chain: Arc<dyn ChainPort>,
    mint_file: MintReferenceFile,
    pool: String,
    explorer_tx_url: String,
}

impl TokenCreator {
    pub fn new(
        launchpad: Arc<dyn LaunchpadPort>,
        chain: Arc<dyn ChainPort>,
        mint_file: MintReferenceFile,
    ) -> Self {
        Self {
            launchpad,
            chain,
            mint_file,
            pool: "pump".to_string(),
            explorer_tx_url: "https://solscan.io/tx/".to_string(),
        }
    }

    pub fn with_pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = pool.into();
        self
    }

    pub fn with_explorer(mut self, explorer_tx_url: impl Into<String>) -> Self {
        self.explorer_tx_url = explorer_tx_url.into();
        self
    }

    /// Create a token with `config`'s metadata and initial buy, signed by `creator`
    pub async fn create_token(
        &self,
        config: &RunConfig,
        creator: &WalletManager,
    ) -> Result<CreatedToken, CreationError> {
        let mint_keypair = Keypair::new();
        let mint = mint_keypair.pubkey();

        let upload = self.metadata_upload(config).await?;
        let metadata = self
            .launchpad
            .upload_metadata(&upload)
            .await
            .map_err(CreationError::MetadataUpload)?;
        tracing::debug!("Metadata URI for {}: {}", mint, metadata.uri);

        let request = TradeRequest::create(
            creator.public_key(),
            mint.to_string(),
            metadata.into(),
            config.trade.initial_amount_sol,
            config.trade.slippage_pct,
            config.trade.priority_fee_sol,
            self.pool.clone(),
        );
        let bytes = self
            .launchpad
            .trade_transaction(&request)
            .await
            .map_err(CreationError::TradeApi)?;

        let unsigned = decode_transaction(&bytes)?;
        let signed = sign_transaction(unsigned, &[&mint_keypair, creator.keypair()])?;
        let signature = self.chain.send_transaction(&signed).await?;

        tracing::info!("Token created: {}{}", self.explorer_tx_url, signature);
        self.mint_file.record(&mint.to_string());

        Ok(CreatedToken { mint, signature })
    }

    async fn metadata_upload(&self, config: &RunConfig) -> Result<MetadataUpload, CreationError> {
        let token = &config.token;
        let file = tokio::fs::read(&token.logo_path)
            .await
            .map_err(|source| CreationError::LogoUnreadable {
                path: token.logo_path.clone(),
                source,
            })?;

        Ok(MetadataUpload {
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            description: token.description.clone(),
            twitter: token.twitter.clone(),
            telegram: token.telegram.clone(),
            website: token.website.clone(),
            show_name: true,
            file_name: logo_file_name(&token.logo_path),
            file,
        })
    }
}

fn logo_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_LOGO_NAME)
        .to_string()
}
