//! CLI Adapter
//!
//! Command-line interface for pumpcycle.
//! Uses clap derive macros for argument parsing.

mod commands;
mod prompt;

pub use commands::{execute, BalanceCmd, CliApp, Command, SellCmd, WalletAction, WalletsCmd};
pub use prompt::{LinePrompt, StdinPrompt};
