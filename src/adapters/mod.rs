//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Solana: RPC client and wallet management
//! - PumpPortal: metadata upload and local-trade API client
//! - CLI: Command-line interface handlers and terminal prompt

pub mod solana;
pub mod pump_portal;
pub mod cli;

pub use solana::{SolanaClient, WalletManager};
pub use pump_portal::{PumpPortalClient, PumpPortalConfig};
pub use cli::CliApp;
