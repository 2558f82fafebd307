//! Token Sale Client
//!
//! Sells the creator's whole balance of a mint back through the trade API.

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::adapters::solana::{decode_transaction, sign_transaction, WalletError, WalletManager};
use crate::domain::{associated_token_address, raw_to_whole_tokens, TradeParams};
use crate::ports::{ChainError, ChainPort, LaunchpadError, LaunchpadPort, TradeRequest};

#[derive(Debug, Error)]
pub enum SaleError {
    #[error("No tokens to sell for mint {mint}")]
    NothingToSell { mint: String },
    #[error("Chain query failed: {0}")]
    Chain(#[from] ChainError),
    #[error("Sell transaction request failed: {0}")]
    TradeApi(#[from] LaunchpadError),
    #[error("Signing failed: {0}")]
    Signing(#[from] WalletError),
    #[error("Submission failed: {0}")]
    Submission(#[source] ChainError),
}

/// A submitted sale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    pub signature: String,
    /// Whole tokens requested for sale
    pub tokens_sold: u64,
}

pub struct TokenSeller {
    launchpad: Arc<dyn LaunchpadPort>,
    chain: Arc<dyn ChainPort>,
    pool: String,
    explorer_tx_url: String,
}

impl TokenSeller {
    pub fn new(launchpad: Arc<dyn LaunchpadPort>, chain: Arc<dyn ChainPort>) -> Self {
        Self {
            launchpad,
            chain,
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

    /// Sell everything `seller` holds of `mint`.
    ///
    /// The raw balance is rounded to the nearest whole token before the
    /// request, so any fractional remainder stays in the account.
    pub async fn sell_token(
        &self,
        mint: &Pubkey,
        trade: &TradeParams,
        seller: &WalletManager,
    ) -> Result<SaleReceipt, SaleError> {
        let token_account = associated_token_address(&seller.pubkey(), mint);

        let (raw_balance, decimals) = tokio::try_join!(
            self.chain.get_token_account_balance(&token_account),
            self.chain.get_mint_decimals(mint),
        )?;

        let tokens = raw_to_whole_tokens(raw_balance, decimals);
        if raw_balance == 0 || tokens == 0 {
            return Err(SaleError::NothingToSell { mint: mint.to_string() });
        }
        tracing::info!(
            "Selling {} tokens of {} (raw {}, {} decimals)",
            tokens,
            mint,
            raw_balance,
            decimals
        );

        let request = TradeRequest::sell(
            seller.public_key(),
            mint.to_string(),
            tokens,
            trade.slippage_pct,
            trade.priority_fee_sol,
            self.pool.clone(),
        );
        let bytes = self.launchpad.trade_transaction(&request).await?;

        let unsigned = decode_transaction(&bytes)?;
        let signed = sign_transaction(unsigned, &[seller.keypair()])?;
        let signature = self
            .chain
            .send_transaction(&signed)
            .await
            .map_err(SaleError::Submission)?;

        tracing::info!("Token sold: {}{}", self.explorer_tx_url, signature);
        Ok(SaleReceipt { signature, tokens_sold: tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chain::MockChainPort;
    use crate::ports::launchpad::MockLaunchpadPort;
    use crate::ports::mocks::{ScriptedChain, ScriptedLaunchpad, TradeReply};
    use crate::ports::{TradeAction, TradeAmount};
    use mockall::predicate::eq;
    use solana_sdk::signature::{Keypair, Signer};

    fn trade() -> TradeParams {
        TradeParams { initial_amount_sol: 0.3, slippage_pct: 10, priority_fee_sol: 0.000005 }
    }

    #[tokio::test]
    async fn test_sell_rounds_to_whole_tokens() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();
        let launchpad = Arc::new(ScriptedLaunchpad::new());
        let chain = Arc::new(ScriptedChain::new().with_token_balance(1_234_500, 6));
        let client = TokenSeller::new(launchpad.clone(), chain.clone());

        let receipt = client.sell_token(&mint, &trade(), &seller).await.unwrap();
        assert_eq!(receipt.tokens_sold, 1);

        let trades = launchpad.trades_of(TradeAction::Sell);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].amount, TradeAmount::Tokens("1".to_string()));
        assert_eq!(trades[0].denominated_in_sol, "false");
        assert_eq!(trades[0].mint, mint.to_string());
        assert_eq!(trades[0].slippage, 10);
        assert!(trades[0].token_metadata.is_none());

        let sent = chain.sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].signatures.len(), 1);
        assert!(sent[0].verify_with_results().iter().all(|ok| *ok));
        assert_eq!(receipt.signature, sent[0].signatures[0].to_string());
    }

    #[tokio::test]
    async fn test_queries_associated_token_account() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();
        let ata = associated_token_address(&seller.pubkey(), &mint);

        let mut chain = MockChainPort::new();
        chain
            .expect_get_token_account_balance()
            .with(eq(ata))
            .times(1)
            .returning(|_| Ok(5_000_000_000));
        chain
            .expect_get_mint_decimals()
            .with(eq(mint))
            .times(1)
            .returning(|_| Ok(9));
        chain
            .expect_send_transaction()
            .times(1)
            .returning(|tx| Ok(tx.signatures[0].to_string()));

        let launchpad = Arc::new(ScriptedLaunchpad::new());
        let client = TokenSeller::new(launchpad.clone(), Arc::new(chain));

        let receipt = client.sell_token(&mint, &trade(), &seller).await.unwrap();
        assert_eq!(receipt.tokens_sold, 5);
    }

    #[tokio::test]
    async fn test_zero_balance_is_nothing_to_sell() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();

        let mut launchpad = MockLaunchpadPort::new();
        launchpad.expect_trade_transaction().times(0);
        let chain = Arc::new(ScriptedChain::new().with_token_balance(0, 6));
        let client = TokenSeller::new(Arc::new(launchpad), chain.clone());

        let result = client.sell_token(&mint, &trade(), &seller).await;
        assert!(matches!(result, Err(SaleError::NothingToSell { .. })));
        assert!(chain.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_dust_balance_is_nothing_to_sell() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();

        let mut launchpad = MockLaunchpadPort::new();
        launchpad.expect_trade_transaction().times(0);
        let chain = Arc::new(ScriptedChain::new().with_token_balance(400_000, 6));
        let client = TokenSeller::new(Arc::new(launchpad), chain);

        let result = client.sell_token(&mint, &trade(), &seller).await;
        assert!(matches!(result, Err(SaleError::NothingToSell { .. })));
    }

    #[tokio::test]
    async fn test_missing_token_account_propagates() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();

        let mut chain = MockChainPort::new();
        chain
            .expect_get_token_account_balance()
            .returning(|account| Err(ChainError::AccountNotFound(account.to_string())));
        chain.expect_get_mint_decimals().returning(|_| Ok(6));
        chain.expect_send_transaction().times(0);

        let mut launchpad = MockLaunchpadPort::new();
        launchpad.expect_trade_transaction().times(0);
        let client = TokenSeller::new(Arc::new(launchpad), Arc::new(chain));

        let result = client.sell_token(&mint, &trade(), &seller).await;
        assert!(matches!(result, Err(SaleError::Chain(ChainError::AccountNotFound(_)))));
    }

    #[tokio::test]
    async fn test_trade_api_rejection_propagates() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();
        let launchpad = Arc::new(ScriptedLaunchpad::new().with_replies(vec![TradeReply::Rejected {
            status: 500,
            body: "Internal Server Error".to_string(),
        }]));
        let chain = Arc::new(ScriptedChain::new().with_token_balance(2_000_000, 6));
        let client = TokenSeller::new(launchpad, chain.clone());

        let result = client.sell_token(&mint, &trade(), &seller).await;
        assert!(matches!(
            result,
            Err(SaleError::TradeApi(LaunchpadError::Rejected { status: 500, .. }))
        ));
        assert!(chain.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_submission_rejected() {
        let seller = WalletManager::new_random();
        let mint = Keypair::new().pubkey();
        let chain = Arc::new(
            ScriptedChain::new()
                .with_token_balance(2_000_000, 6)
                .rejecting_sends(),
        );
        let client = TokenSeller::new(Arc::new(ScriptedLaunchpad::new()), chain);

        let result = client.sell_token(&mint, &trade(), &seller).await;
        assert!(matches!(result, Err(SaleError::Submission(_))));
    }
}
