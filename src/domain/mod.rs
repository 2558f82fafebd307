//! Domain Layer - Core types for the token cycle automation
//!
//! Pure types and local persistence with no network access.
//! All chain and API interactions happen through the ports layer.
//!
//! - `run_config`: Parameters of one automation run
//! - `cycle`: Cycle counters, outcomes and the run summary
//! - `amount`: Raw balance and SOL/lamport conversions
//! - `token_account`: Associated token account derivation
//! - `wallet_store`: Named keypairs persisted to a local file
//! - `mint_reference`: Best-effort record of the last created mint

pub mod run_config;
pub mod cycle;
pub mod amount;
pub mod token_account;
pub mod wallet_store;
pub mod mint_reference;

pub use run_config::{RunConfig, RunDefaults, TokenMetadataInput, TradeParams, Timing, WalletRef};
pub use cycle::{CycleOutcome, CycleResult, CycleState, RunSummary};
pub use amount::{raw_to_whole_tokens, sol_to_lamports, lamports_to_sol, LAMPORTS_PER_SOL};
pub use token_account::associated_token_address;
pub use wallet_store::{StoredWallet, WalletMap, WalletRecord, WalletStore, WalletStoreError, DEFAULT_WALLET_FILE};
pub use mint_reference::{MintReference, MintReferenceFile, DEFAULT_MINT_FILE};
