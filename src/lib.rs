//! pumpcycle - create -> wait -> sell token cycles on pump.fun
//!
//! Creates a token through the PumpPortal local-trade API, waits, sells the
//! creator's holding and repeats for a configured number of cycles.
//!
//! # Modules
//!
//! - `domain`: Core types (RunConfig, CycleState, RunSummary, WalletStore)
//! - `ports`: Trait abstractions (ChainPort, LaunchpadPort, Prompt)
//! - `adapters`: External implementations (Solana RPC, PumpPortal, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Wallet selection, balance gate, cycle controller

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
