//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The Solana RPC node (balances, mint info, submission)
//! - The launchpad APIs (metadata upload, unsigned trade transactions)
//! - Operator prompting

pub mod chain;
pub mod launchpad;
pub mod prompt;
pub mod mocks;

pub use chain::{ChainError, ChainPort};
pub use launchpad::{
    LaunchpadError, LaunchpadPort, MetadataUpload, TradeAction, TradeAmount, TradeRequest,
    TradeTokenMetadata, UploadedMetadata,
};
pub use prompt::{Prompt, PromptError};
