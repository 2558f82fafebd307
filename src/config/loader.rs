//! Configuration Loader
//!
//! Loads and validates run-independent settings from a TOML file.
//! Every section has defaults, so a partial (or missing) file is valid as long
//! as an RPC endpoint is provided by the file or the environment.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domain::{RunDefaults, DEFAULT_MINT_FILE, DEFAULT_WALLET_FILE};

/// Environment variable overriding `solana.rpc_url`
pub const RPC_URL_ENV: &str = "SOLANA_RPC_URL";

/// Main configuration structure matching pumpcycle.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub solana: SolanaSection,
    pub launchpad: LaunchpadSection,
    pub storage: StorageSection,
    pub automation: AutomationSection,
    pub defaults: RunDefaults,
    pub logging: LoggingSection,
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolanaSection {
    /// RPC endpoint (use a private RPC for production)
    pub rpc_url: String,
    /// Commitment level: "processed", "confirmed", "finalized"
    pub commitment: String,
    /// Prefix for transaction links in logs
    pub explorer_tx_url: String,
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            commitment: "confirmed".to_string(),
            explorer_tx_url: "https://solscan.io/tx/".to_string(),
        }
    }
}

impl SolanaSection {
    /// Explorer link for a transaction signature
    pub fn tx_link(&self, signature: &str) -> String {
        format!("{}{}", self.explorer_tx_url, signature)
    }
}

/// Launchpad API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LaunchpadSection {
    /// pump.fun IPFS metadata endpoint
    pub metadata_url: String,
    /// PumpPortal local-trade endpoint
    pub trade_url: String,
    /// Trading pool passed to the trade API
    pub pool: String,
    /// Optional HTTP timeout; unset means no timeout
    pub timeout_secs: Option<u64>,
}

impl Default for LaunchpadSection {
    fn default() -> Self {
        Self {
            metadata_url: "https://pump.fun/api/ipfs".to_string(),
            trade_url: "https://pumpportal.fun/api/trade-local".to_string(),
            pool: "pump".to_string(),
            timeout_secs: None,
        }
    }
}

/// Local files
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Named wallet store
    pub wallet_file: String,
    /// Last created mint, for operator reference
    pub mint_file: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            wallet_file: DEFAULT_WALLET_FILE.to_string(),
            mint_file: DEFAULT_MINT_FILE.to_string(),
        }
    }
}

impl StorageSection {
    pub fn wallet_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.wallet_file).to_string())
    }

    pub fn mint_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.mint_file).to_string())
    }
}

/// Cycle loop and operator gate settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutomationSection {
    /// Minimum SOL balance before the run may start
    pub min_balance_sol: f64,
    /// Pause between cycles in milliseconds
    pub inter_cycle_delay_ms: u64,
    /// Countdown resolution while waiting to sell
    pub countdown_tick_ms: u64,
    /// Invalid menu answers tolerated before wallet selection gives up
    pub max_prompt_attempts: u32,
}

impl Default for AutomationSection {
    fn default() -> Self {
        Self {
            min_balance_sol: 0.01,
            inter_cycle_delay_ms: 5_000,
            countdown_tick_ms: 1_000,
            max_prompt_attempts: 5,
        }
    }
}

impl AutomationSection {
    pub fn inter_cycle_delay(&self) -> Duration {
        Duration::from_millis(self.inter_cycle_delay_ms)
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load settings from a TOML file, apply environment overrides and validate.
///
/// A missing file falls back to built-in defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let mut settings = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        Settings::default()
    };

    settings.apply_env();
    settings.validate()?;
    Ok(settings)
}

/// Parse settings from a TOML string without touching the environment
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content)?;
    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            if !url.trim().is_empty() {
                self.solana.rpc_url = url.trim().to_string();
            }
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solana.rpc_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "rpc_url is missing; set [solana] rpc_url or {}",
                RPC_URL_ENV
            )));
        }

        if crate::adapters::solana::parse_commitment(&self.solana.commitment).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "commitment must be processed, confirmed or finalized, got {}",
                self.solana.commitment
            )));
        }

        if self.launchpad.metadata_url.is_empty() || self.launchpad.trade_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "launchpad metadata_url and trade_url cannot be empty".to_string(),
            ));
        }

        if self.launchpad.pool.is_empty() {
            return Err(ConfigError::ValidationError(
                "launchpad pool cannot be empty".to_string(),
            ));
        }

        if self.storage.wallet_file.is_empty() {
            return Err(ConfigError::ValidationError(
                "wallet_file cannot be empty".to_string(),
            ));
        }

        if !self.automation.min_balance_sol.is_finite() || self.automation.min_balance_sol < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_balance_sol must be >= 0, got {}",
                self.automation.min_balance_sol
            )));
        }

        if self.automation.countdown_tick_ms == 0 {
            return Err(ConfigError::ValidationError(
                "countdown_tick_ms must be > 0".to_string(),
            ));
        }

        if self.automation.max_prompt_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "max_prompt_attempts must be > 0".to_string(),
            ));
        }

        self.defaults
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("defaults: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[solana]
rpc_url = "https://api.mainnet-beta.solana.com"
commitment = "confirmed"
explorer_tx_url = "https://solscan.io/tx/"

[launchpad]
metadata_url = "https://pump.fun/api/ipfs"
trade_url = "https://pumpportal.fun/api/trade-local"
pool = "pump"

[storage]
wallet_file = "stored_wallets.json"
mint_file = "mint.json"

[automation]
min_balance_sol = 0.01
inter_cycle_delay_ms = 5000
countdown_tick_ms = 1000
max_prompt_attempts = 5

[defaults]
token_name = "Zephyr AI"
token_symbol = "ZPHR"
initial_amount_sol = 0.3
slippage_pct = 10
priority_fee_sol = 0.000005
wait_time_ms = 120000
cycles = 30

[logging]
level = "info"
"#
        .to_string()
    }

    #[test]
    fn test_parse_valid_config() {
        let settings = parse_settings(&create_valid_config()).unwrap();

        assert_eq!(settings.solana.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(settings.launchpad.pool, "pump");
        assert_eq!(settings.automation.inter_cycle_delay(), Duration::from_secs(5));
        assert_eq!(settings.defaults.cycles, 30);
        assert_eq!(settings.defaults.website_url, "https://www.zephyrai.dev/");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(create_valid_config().as_bytes()).unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert!(!settings.solana.rpc_url.is_empty());
        assert_eq!(settings.storage.wallet_path(), PathBuf::from("stored_wallets.json"));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let settings = parse_settings(
            r#"
[solana]
rpc_url = "http://localhost:8899"
"#,
        )
        .unwrap();

        assert_eq!(settings.solana.commitment, "confirmed");
        assert_eq!(settings.launchpad.trade_url, "https://pumpportal.fun/api/trade-local");
        assert_eq!(settings.automation.min_balance_sol, 0.01);
        assert_eq!(settings.automation.max_prompt_attempts, 5);
        assert_eq!(settings.defaults, RunDefaults::default());
        assert!(settings.launchpad.timeout_secs.is_none());
    }

    #[test]
    fn test_missing_rpc_url() {
        let result = parse_settings("[logging]\nlevel = \"debug\"\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_commitment() {
        let result = parse_settings(
            r#"
[solana]
rpc_url = "http://localhost:8899"
commitment = "fast"
"#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_defaults() {
        let result = parse_settings(
            r#"
[solana]
rpc_url = "http://localhost:8899"

[defaults]
cycles = 0
"#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = parse_settings("[solana\nrpc_url = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_tx_link() {
        let section = SolanaSection::default();
        assert_eq!(section.tx_link("abc"), "https://solscan.io/tx/abc");
    }
}
