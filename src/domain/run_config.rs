//! Run Configuration
//!
//! Immutable parameters for one automation run, gathered once from the
//! operator and shared read-only by the creation and sale clients.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Token metadata submitted to the metadata service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadataInput {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub twitter: String,
    pub telegram: String,
    pub website: String,
    /// Path to the logo image uploaded with the metadata
    pub logo_path: PathBuf,
}

/// Trade parameters passed to the trade API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeParams {
    /// Initial buy on creation, in SOL
    pub initial_amount_sol: f64,
    /// Slippage tolerance in percent (10 = 10%)
    pub slippage_pct: u32,
    /// Priority fee in SOL
    pub priority_fee_sol: f64,
}

/// Timing of the create -> wait -> sell loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Wait between creation and sale, in milliseconds
    pub wait_time_ms: u64,
    /// Number of cycles to run
    pub cycles: u32,
}

/// Which stored wallet signs for the run. Secret material is not copied here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRef {
    pub name: String,
    pub public_key: String,
}

/// Full configuration of an automation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub wallet: WalletRef,
    pub token: TokenMetadataInput,
    pub trade: TradeParams,
    pub timing: Timing,
}

/// Defaults applied to blank, unparseable or non-positive input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    pub token_name: String,
    pub token_symbol: String,
    pub token_description: String,
    pub twitter_url: String,
    pub telegram_url: String,
    pub website_url: String,
    pub logo_path: String,
    pub initial_amount_sol: f64,
    pub slippage_pct: u32,
    pub priority_fee_sol: f64,
    pub wait_time_ms: u64,
    pub cycles: u32,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            token_name: "Zephyr AI".to_string(),
            token_symbol: "ZPHR".to_string(),
            token_description: String::new(),
            twitter_url: "https://x.com/Zephyraisol".to_string(),
            telegram_url: String::new(),
            website_url: "https://www.zephyrai.dev/".to_string(),
            logo_path: "./logo.png".to_string(),
            initial_amount_sol: 0.3,
            slippage_pct: 10,
            priority_fee_sol: 0.000005,
            wait_time_ms: 120_000,
            cycles: 30,
        }
    }
}

impl RunDefaults {
    /// Check that every default is itself usable
    pub fn validate(&self) -> Result<(), String> {
        if !is_positive(self.initial_amount_sol) {
            return Err(format!("initial_amount_sol must be > 0, got {}", self.initial_amount_sol));
        }
        if !is_positive(self.priority_fee_sol) {
            return Err(format!("priority_fee_sol must be > 0, got {}", self.priority_fee_sol));
        }
        if self.slippage_pct == 0 || self.slippage_pct > 100 {
            return Err(format!("slippage_pct must be 1-100, got {}", self.slippage_pct));
        }
        if self.wait_time_ms == 0 {
            return Err("wait_time_ms must be > 0".to_string());
        }
        if self.cycles == 0 {
            return Err("cycles must be > 0".to_string());
        }
        if self.token_name.is_empty() || self.token_symbol.is_empty() {
            return Err("token_name and token_symbol cannot be empty".to_string());
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl RunConfig {
    /// Replace every non-finite or non-positive numeric field with its default
    pub fn sanitize(mut self, defaults: &RunDefaults) -> Self {
        if !is_positive(self.trade.initial_amount_sol) {
            self.trade.initial_amount_sol = defaults.initial_amount_sol;
        }
        if !is_positive(self.trade.priority_fee_sol) {
            self.trade.priority_fee_sol = defaults.priority_fee_sol;
        }
        if self.trade.slippage_pct == 0 {
            self.trade.slippage_pct = defaults.slippage_pct;
        }
        if self.timing.wait_time_ms == 0 {
            self.timing.wait_time_ms = defaults.wait_time_ms;
        }
        if self.timing.cycles == 0 {
            self.timing.cycles = defaults.cycles;
        }
        self
    }

    /// Wait time in whole seconds, for display
    pub fn wait_secs(&self) -> f64 {
        self.timing.wait_time_ms as f64 / 1000.0
    }
}
