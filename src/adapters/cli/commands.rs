//! CLI Command Handlers
//!
//! Implementation of all CLI commands for pumpcycle.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;

use crate::adapters::solana::WalletManager;
use crate::application::{gather_run_config, AppContext, BalanceGateError};
use crate::config::Settings;
use crate::domain::{lamports_to_sol, TradeParams, WalletRecord, WalletRef};
use super::prompt::StdinPrompt;

/// pumpcycle - create -> wait -> sell token cycles on pump.fun
#[derive(Parser, Debug)]
#[command(
    name = "pumpcycle",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Repeated create -> wait -> sell token cycles on pump.fun",
    long_about = "pumpcycle creates a token through the PumpPortal local-trade API, waits, \
                  sells the creator's holding, and repeats for a configured number of cycles."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true, default_value = "config/pumpcycle.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a wallet, configure and run the automation
    Run,

    /// Manage stored wallets
    Wallets(WalletsCmd),

    /// Show a stored wallet's SOL balance
    Balance(BalanceCmd),

    /// Sell a wallet's whole holding of a mint
    Sell(SellCmd),
}

#[derive(Parser, Debug)]
pub struct WalletsCmd {
    #[command(subcommand)]
    pub action: WalletAction,
}

#[derive(Subcommand, Debug)]
pub enum WalletAction {
    /// List stored wallets
    List,

    /// Generate and store a new wallet
    Create {
        /// Wallet name
        name: String,
    },

    /// Delete a stored wallet
    Delete {
        /// Wallet name
        name: String,
    },
}

#[derive(Parser, Debug)]
pub struct BalanceCmd {
    /// Wallet name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct SellCmd {
    /// Token mint address
    pub mint: String,

    /// Stored wallet holding the tokens
    #[arg(short, long)]
    pub wallet: String,

    /// Slippage percentage (defaults to settings)
    #[arg(long)]
    pub slippage: Option<u32>,

    /// Priority fee in SOL (defaults to settings)
    #[arg(long)]
    pub priority_fee: Option<f64>,
}

/// Execute the CLI command
pub async fn execute(command: Command, settings: Settings) -> Result<()> {
    let prompt = Arc::new(StdinPrompt::stdio());
    let ctx = AppContext::from_settings(settings, prompt).context("Failed to build application context")?;

    match command {
        Command::Run => run_command(&ctx).await,
        Command::Wallets(cmd) => wallets_command(&ctx, cmd),
        Command::Balance(cmd) => balance_command(&ctx, cmd).await,
        Command::Sell(cmd) => sell_command(&ctx, cmd).await,
    }
}

/// Handle run command
async fn run_command(ctx: &AppContext) -> Result<()> {
    let record = ctx
        .wallet_selector()
        .select()
        .context("Wallet selection failed")?;
    let wallet = WalletManager::from_record(&record)
        .with_context(|| format!("Stored wallet '{}' is invalid", record.name))?;
    println!("Using wallet: {}", record.name);

    match ctx.balance_gate().wait_for_sufficient_balance(&wallet.pubkey()).await {
        Ok(_) => {}
        Err(BalanceGateError::OperatorQuit) => {
            println!("Exiting...");
            return Ok(());
        }
        Err(e) => return Err(e).context("Balance check failed"),
    }

    let wallet_ref = WalletRef {
        name: record.name.clone(),
        public_key: record.public_key.clone(),
    };
    let prompt = ctx.prompt();
    let config = gather_run_config(prompt.as_ref(), wallet_ref, &ctx.settings().defaults)
        .context("Failed to read run configuration")?;

    let summary = ctx.cycle_controller(wallet, config).start().await;
    tracing::debug!("Run finished after {}s", summary.elapsed().num_seconds());
    Ok(())
}

/// Handle wallets command
fn wallets_command(ctx: &AppContext, cmd: WalletsCmd) -> Result<()> {
    let store = ctx.wallet_store();

    match cmd.action {
        WalletAction::List => {
            let wallets = store.load();
            if wallets.is_empty() {
                println!("No stored wallets in {}", store.path().display());
            }
            for (name, wallet) in &wallets {
                println!("{}: {}", name, wallet.public_key);
            }
        }
        WalletAction::Create { name } => {
            let record = store.generate(&name).context("Failed to store wallet")?;
            println!("New wallet generated:");
            println!("Public Key: {}", record.public_key);
            println!("Private Key: {}", record.private_key);
            println!("Wallet \"{}\" has been stored.", record.name);
        }
        WalletAction::Delete { name } => {
            if store.delete(&name).context("Failed to update wallet store")? {
                println!("Wallet \"{}\" has been deleted.", name);
            } else {
                println!("No wallet named \"{}\".", name);
            }
        }
    }

    Ok(())
}

/// Handle balance command
async fn balance_command(ctx: &AppContext, cmd: BalanceCmd) -> Result<()> {
    let record = stored_wallet(ctx, &cmd.name)?;
    let owner = Pubkey::from_str(&record.public_key)
        .with_context(|| format!("Invalid public key for wallet '{}'", record.name))?;

    let balance = ctx
        .chain()
        .get_balance(&owner)
        .await
        .context("Failed to get balance")?;

    println!("Wallet: {} ({})", record.name, record.public_key);
    println!("Balance: {} lamports ({:.4} SOL)", balance, lamports_to_sol(balance));
    Ok(())
}

/// Handle sell command
async fn sell_command(ctx: &AppContext, cmd: SellCmd) -> Result<()> {
    let record = stored_wallet(ctx, &cmd.wallet)?;
    let wallet = WalletManager::from_record(&record)
        .with_context(|| format!("Stored wallet '{}' is invalid", record.name))?;
    let mint = Pubkey::from_str(&cmd.mint).context("Invalid mint address")?;

    let defaults = &ctx.settings().defaults;
    let trade = TradeParams {
        initial_amount_sol: defaults.initial_amount_sol,
        slippage_pct: cmd.slippage.unwrap_or(defaults.slippage_pct),
        priority_fee_sol: cmd.priority_fee.unwrap_or(defaults.priority_fee_sol),
    };

    let receipt = ctx
        .token_seller()
        .sell_token(&mint, &trade, &wallet)
        .await
        .with_context(|| format!("Failed to sell {}", mint))?;

    println!("Sold {} tokens of {}", receipt.tokens_sold, mint);
    println!("Transaction: {}", ctx.settings().solana.tx_link(&receipt.signature));
    Ok(())
}

fn stored_wallet(ctx: &AppContext, name: &str) -> Result<WalletRecord> {
    ctx.wallet_store()
        .get(name)
        .with_context(|| format!("No stored wallet named '{}'", name))
}
