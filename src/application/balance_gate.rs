//! Balance Gate
//!
//! Manual pre-run gate: checks the creator's SOL balance and, while it is
//! below the minimum, lets the operator refresh after funding or quit.
//! There is no timeout; quitting is an explicit error for the caller.

use std::sync::Arc;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::domain::amount::{lamports_to_sol, sol_to_lamports};
use crate::ports::{ChainError, ChainPort, Prompt, PromptError};

/// 0.01 SOL
pub const DEFAULT_MIN_BALANCE_LAMPORTS: u64 = 10_000_000;

const REFRESH_QUESTION: &str =
    "Insufficient balance. Please send SOL to the wallet. Enter 'r' to refresh balance or 'q' to quit: ";

#[derive(Debug, Error)]
pub enum BalanceGateError {
    #[error("Operator quit while waiting for funds")]
    OperatorQuit,
    #[error("Balance lookup failed: {0}")]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

pub struct BalanceGate {
    chain: Arc<dyn ChainPort>,
    prompt: Arc<dyn Prompt>,
    minimum_lamports: u64,
}

impl BalanceGate {
    pub fn new(chain: Arc<dyn ChainPort>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            chain,
            prompt,
            minimum_lamports: DEFAULT_MIN_BALANCE_LAMPORTS,
        }
    }

    pub fn with_minimum_sol(mut self, sol: f64) -> Self {
        self.minimum_lamports = sol_to_lamports(sol);
        self
    }

    pub fn minimum_lamports(&self) -> u64 {
        self.minimum_lamports
    }

    /// Block until `owner` holds at least the minimum. Returns the balance in lamports.
    pub async fn wait_for_sufficient_balance(&self, owner: &Pubkey) -> Result<u64, BalanceGateError> {
        loop {
            let balance = self.chain.get_balance(owner).await?;
            self.prompt
                .say(&format!("Current balance: {} SOL", lamports_to_sol(balance)));

            if balance >= self.minimum_lamports {
                tracing::info!("Sufficient balance detected ({} lamports)", balance);
                return Ok(balance);
            }

            let answer = self.prompt.ask(REFRESH_QUESTION)?;
            match answer.to_lowercase().as_str() {
                "q" => {
                    tracing::info!("Operator quit at balance gate");
                    return Err(BalanceGateError::OperatorQuit);
                }
                "r" => {}
                _ => self
                    .prompt
                    .say("Invalid input. Please enter 'r' to refresh or 'q' to quit."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{ScriptedChain, ScriptedPrompt};

    fn gate(chain: &Arc<ScriptedChain>, prompt: &Arc<ScriptedPrompt>) -> BalanceGate {
        BalanceGate::new(chain.clone(), prompt.clone())
    }

    #[tokio::test]
    async fn test_sufficient_balance_returns_without_prompting() {
        let chain = Arc::new(ScriptedChain::new().with_balances(&[DEFAULT_MIN_BALANCE_LAMPORTS]));
        let prompt = Arc::new(ScriptedPrompt::new(&[]));

        let balance = gate(&chain, &prompt)
            .wait_for_sufficient_balance(&Pubkey::new_unique())
            .await
            .unwrap();

        assert_eq!(balance, DEFAULT_MIN_BALANCE_LAMPORTS);
        assert!(prompt.get_questions().is_empty());
        assert_eq!(chain.get_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_until_funded() {
        let chain = Arc::new(ScriptedChain::new().with_balances(&[0, 5_000_000, 2_000_000_000]));
        let prompt = Arc::new(ScriptedPrompt::new(&["r", "R"]));

        let balance = gate(&chain, &prompt)
            .wait_for_sufficient_balance(&Pubkey::new_unique())
            .await
            .unwrap();

        assert_eq!(balance, 2_000_000_000);
        assert_eq!(prompt.get_questions().len(), 2);
        assert_eq!(chain.get_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_input_rechecks_balance() {
        let chain = Arc::new(ScriptedChain::new().with_balances(&[0, 0, 20_000_000]));
        let prompt = Arc::new(ScriptedPrompt::new(&["maybe", "r"]));

        gate(&chain, &prompt)
            .wait_for_sufficient_balance(&Pubkey::new_unique())
            .await
            .unwrap();

        assert!(prompt
            .get_output()
            .iter()
            .any(|line| line.starts_with("Invalid input")));
    }

    #[tokio::test]
    async fn test_quit() {
        let chain = Arc::new(ScriptedChain::new().with_balances(&[0]));
        let prompt = Arc::new(ScriptedPrompt::new(&["q"]));

        let result = gate(&chain, &prompt)
            .wait_for_sufficient_balance(&Pubkey::new_unique())
            .await;

        assert!(matches!(result, Err(BalanceGateError::OperatorQuit)));
    }

    #[tokio::test]
    async fn test_custom_minimum() {
        let chain = Arc::new(ScriptedChain::new().with_balances(&[500_000_000]));
        let prompt = Arc::new(ScriptedPrompt::new(&["q"]));

        let gate = gate(&chain, &prompt).with_minimum_sol(1.0);
        assert_eq!(gate.minimum_lamports(), 1_000_000_000);

        let result = gate.wait_for_sufficient_balance(&Pubkey::new_unique()).await;
        assert!(matches!(result, Err(BalanceGateError::OperatorQuit)));
    }

    #[tokio::test]
    async fn test_closed_input_is_error() {
        let chain = Arc::new(ScriptedChain::new().with_balances(&[0]));
        let prompt = Arc::new(ScriptedPrompt::new(&[]));

        let result = gate(&chain, &prompt)
            .wait_for_sufficient_balance(&Pubkey::new_unique())
            .await;

        assert!(matches!(result, Err(BalanceGateError::Prompt(PromptError::Closed))));
    }
}
