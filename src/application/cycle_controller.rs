//! Cycle Controller
//!
//! Runs `cycles` create -> wait -> sell attempts in sequence. Each attempt is
//! final: failures are logged, counted and never retried, and no failure
//! aborts the run.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use crate::adapters::solana::WalletManager;
use crate::application::token_creator::TokenCreator;
use crate::application::token_seller::TokenSeller;
use crate::domain::{CycleOutcome, CycleResult, CycleState, RunConfig, RunSummary};
use crate::ports::Prompt;

pub const DEFAULT_INTER_CYCLE_DELAY: Duration = Duration::from_millis(5_000);
pub const DEFAULT_COUNTDOWN_TICK: Duration = Duration::from_secs(1);

pub struct CycleController {
    creator: TokenCreator,
    seller: TokenSeller,
    wallet: WalletManager,
    config: RunConfig,
    console: Arc<dyn Prompt>,
    inter_cycle_delay: Duration,
    countdown_tick: Duration,
    state: CycleState,
    results: Vec<CycleResult>,
}

impl CycleController {
    pub fn new(
        creator: TokenCreator,
        seller: TokenSeller,
        wallet: WalletManager,
        config: RunConfig,
        console: Arc<dyn Prompt>,
    ) -> Self {
        let state = CycleState::new(config.timing.cycles);
        Self {
            creator,
            seller,
            wallet,
            config,
            console,
            inter_cycle_delay: DEFAULT_INTER_CYCLE_DELAY,
            countdown_tick: DEFAULT_COUNTDOWN_TICK,
            state,
            results: Vec::new(),
        }
    }

    pub fn with_inter_cycle_delay(mut self, delay: Duration) -> Self {
        self.inter_cycle_delay = delay;
        self
    }

    pub fn with_countdown_tick(mut self, tick: Duration) -> Self {
        self.countdown_tick = tick.max(Duration::from_millis(1));
        self
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Run every cycle and return the summary
    pub async fn start(mut self) -> RunSummary {
        let started_at = Utc::now();
        tracing::info!(
            "Starting automation: {} cycles, wait {}ms, initial buy {} SOL",
            self.config.timing.cycles,
            self.config.timing.wait_time_ms,
            self.config.trade.initial_amount_sol
        );

        while let Some(index) = self.state.next_index() {
            let result = self.run_cycle(index).await;
            self.state = self.state.advance(&result);
            self.results.push(result);

            self.console.say(&self.state.status_report());

            if !self.state.is_complete() {
                tracing::debug!("Waiting {:?} before next cycle", self.inter_cycle_delay);
                tokio::time::sleep(self.inter_cycle_delay).await;
            }
        }

        let summary = RunSummary::new(self.state, started_at, self.results);
        self.console.say(&summary.to_string());
        tracing::info!(
            "Automation finished: {}/{} successful ({:.2}%)",
            summary.successful,
            summary.total,
            summary.success_rate()
        );
        summary
    }

    /// One create -> wait -> sell attempt
    pub async fn run_cycle(&self, index: u32) -> CycleResult {
        tracing::info!("Cycle {}/{}", index + 1, self.config.timing.cycles);

        let created = match self.creator.create_token(&self.config, &self.wallet).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!("Cycle {} failed: token creation: {}", index + 1, e);
                return CycleResult {
                    index,
                    outcome: CycleOutcome::failure(format!("creation: {}", e)),
                };
            }
        };
        tracing::info!("Created mint {}", created.mint);

        self.countdown(Duration::from_millis(self.config.timing.wait_time_ms))
            .await;

        let outcome = match self
            .seller
            .sell_token(&created.mint, &self.config.trade, &self.wallet)
            .await
        {
            Ok(receipt) => CycleOutcome::Success {
                mint: created.mint.to_string(),
                sell_signature: receipt.signature,
            },
            Err(e) => {
                tracing::error!("Cycle {} failed: sale of {}: {}", index + 1, created.mint, e);
                CycleOutcome::failure(format!("sale of {}: {}", created.mint, e))
            }
        };

        CycleResult { index, outcome }
    }

    /// Sleep for `total`, printing the whole seconds left every tick
    async fn countdown(&self, total: Duration) {
        let deadline = Instant::now() + total;

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let left = deadline - now;
            self.console
                .progress(&format!("Time remaining: {}s ", left.as_secs_f64().ceil() as u64));
            tokio::time::sleep(left.min(self.countdown_tick)).await;
        }
        self.console.say("");
    }
}
