//! Application Layer - Use cases wiring domain and ports
//!
//! - `wallet_selection`: interactive choice, creation and deletion of stored wallets
//! - `balance_gate`: manual funding gate before a run
//! - `interactive_config`: prompts for every run parameter
//! - `token_creator` / `token_seller`: the two halves of a cycle
//! - `cycle_controller`: the create -> wait -> sell loop
//! - `context`: settings-driven construction of all of the above

pub mod balance_gate;
pub mod context;
pub mod cycle_controller;
pub mod interactive_config;
pub mod token_creator;
pub mod token_seller;
pub mod wallet_selection;

pub use balance_gate::{BalanceGate, BalanceGateError, DEFAULT_MIN_BALANCE_LAMPORTS};
pub use context::{AppContext, ContextError};
pub use cycle_controller::{CycleController, DEFAULT_COUNTDOWN_TICK, DEFAULT_INTER_CYCLE_DELAY};
pub use interactive_config::gather_run_config;
pub use token_creator::{CreatedToken, CreationError, TokenCreator};
pub use token_seller::{SaleError, SaleReceipt, TokenSeller};
pub use wallet_selection::{SelectionError, WalletSelector, DEFAULT_MAX_ATTEMPTS};
