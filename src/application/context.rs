//! Application context
//!
//! Everything a command needs, built once at startup from [`Settings`] and
//! handed to each component explicitly.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::adapters::pump_portal::{PumpPortalClient, PumpPortalConfig};
use crate::adapters::solana::{parse_commitment, SolanaClient, WalletManager};
use crate::application::balance_gate::BalanceGate;
use crate::application::cycle_controller::CycleController;
use crate::application::token_creator::TokenCreator;
use crate::application::token_seller::TokenSeller;
use crate::application::wallet_selection::WalletSelector;
use crate::config::Settings;
use crate::domain::{MintReferenceFile, RunConfig, WalletStore};
use crate::ports::{ChainPort, LaunchpadError, LaunchpadPort, Prompt};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Unknown commitment level: {0}")]
    InvalidCommitment(String),
    #[error("Failed to build launchpad client: {0}")]
    Launchpad(#[from] LaunchpadError),
}

pub struct AppContext {
    settings: Settings,
    chain: Arc<dyn ChainPort>,
    launchpad: Arc<dyn LaunchpadPort>,
    prompt: Arc<dyn Prompt>,
}

impl AppContext {
    /// Connect the real RPC and launchpad clients
    pub fn from_settings(settings: Settings, prompt: Arc<dyn Prompt>) -> Result<Self, ContextError> {
        let commitment = parse_commitment(&settings.solana.commitment)
            .ok_or_else(|| ContextError::InvalidCommitment(settings.solana.commitment.clone()))?;
        let chain = SolanaClient::with_commitment(settings.solana.rpc_url.clone(), commitment);
        tracing::info!("Connected to RPC: {}", chain.url());

        let launchpad = PumpPortalClient::with_config(PumpPortalConfig {
            metadata_url: settings.launchpad.metadata_url.clone(),
            trade_url: settings.launchpad.trade_url.clone(),
            timeout: settings.launchpad.timeout_secs.map(Duration::from_secs),
        })?;

        Ok(Self::new(settings, Arc::new(chain), Arc::new(launchpad), prompt))
    }

    pub fn new(
        settings: Settings,
        chain: Arc<dyn ChainPort>,
        launchpad: Arc<dyn LaunchpadPort>,
        prompt: Arc<dyn Prompt>,
    ) -> Self {
        Self {
            settings,
            chain,
            launchpad,
            prompt,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn chain(&self) -> Arc<dyn ChainPort> {
        Arc::clone(&self.chain)
    }

    pub fn prompt(&self) -> Arc<dyn Prompt> {
        Arc::clone(&self.prompt)
    }

    pub fn wallet_store(&self) -> WalletStore {
        WalletStore::new(self.settings.storage.wallet_path())
    }

    pub fn mint_file(&self) -> MintReferenceFile {
        MintReferenceFile::new(self.settings.storage.mint_path())
    }

    pub fn wallet_selector(&self) -> WalletSelector {
        WalletSelector::new(self.wallet_store(), self.prompt())
            .with_max_attempts(self.settings.automation.max_prompt_attempts)
    }

    pub fn balance_gate(&self) -> BalanceGate {
        BalanceGate::new(self.chain(), self.prompt())
            .with_minimum_sol(self.settings.automation.min_balance_sol)
    }

    pub fn token_creator(&self) -> TokenCreator {
        TokenCreator::new(Arc::clone(&self.launchpad), self.chain(), self.mint_file())
            .with_pool(self.settings.launchpad.pool.clone())
            .with_explorer(self.settings.solana.explorer_tx_url.clone())
    }

    pub fn token_seller(&self) -> TokenSeller {
        TokenSeller::new(Arc::clone(&self.launchpad), self.chain())
            .with_pool(self.settings.launchpad.pool.clone())
            .with_explorer(self.settings.solana.explorer_tx_url.clone())
    }

    pub fn cycle_controller(&self, wallet: WalletManager, config: RunConfig) -> CycleController {
        CycleController::new(
            self.token_creator(),
            self.token_seller(),
            wallet,
            config,
            self.prompt(),
        )
        .with_inter_cycle_delay(self.settings.automation.inter_cycle_delay())
        .with_countdown_tick(self.settings.automation.countdown_tick())
    }
}
