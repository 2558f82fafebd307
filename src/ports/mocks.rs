//! Scripted port implementations that record calls and return controlled
//! responses. Used by the integration tests and by offline dry runs.

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;

use super::chain::{ChainError, ChainPort};
use super::launchpad::{
    LaunchpadError, LaunchpadPort, MetadataUpload, TradeAction, TradeRequest, UploadedMetadata,
};
use super::prompt::{Prompt, PromptError};

/// Serialize an unsigned transaction paid by `payer` that also needs `co_signers`
pub fn unsigned_transaction(payer: &Pubkey, co_signers: &[Pubkey]) -> Vec<u8> {
    let accounts = co_signers
        .iter()
        .map(|key| AccountMeta::new(*key, true))
        .collect();
    let instruction = Instruction::new_with_bytes(solana_sdk::system_program::id(), &[0], accounts);
    let message = Message::new(&[instruction], Some(payer));
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
        message: VersionedMessage::Legacy(message),
    };
    bincode::serialize(&transaction).unwrap()
}

/// Chain mock with scripted balances
#[derive(Debug, Default)]
pub struct ScriptedChain {
    calls: Arc<Mutex<Vec<String>>>,
    balances: Arc<Mutex<VecDeque<u64>>>,
    token_balance: u64,
    decimals: u8,
    reject_sends: bool,
    sent: Arc<Mutex<Vec<VersionedTransaction>>>,
}

impl ScriptedChain {
    pub fn new() -> Self {
        Self {
            decimals: 6,
            ..Default::default()
        }
    }

    /// SOL balances returned in order; the last one repeats
    pub fn with_balances(self, lamports: &[u64]) -> Self {
        *self.balances.lock().unwrap() = lamports.iter().copied().collect();
        self
    }

    pub fn with_token_balance(mut self, raw: u64, decimals: u8) -> Self {
        self.token_balance = raw;
        self.decimals = decimals;
        self
    }

    pub fn rejecting_sends(mut self) -> Self {
        self.reject_sends = true;
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_transactions(&self) -> Vec<VersionedTransaction> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainPort for ScriptedChain {
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64, ChainError> {
        self.calls.lock().unwrap().push(format!("get_balance:{}", owner));
        let mut balances = self.balances.lock().unwrap();
        let balance = if balances.len() > 1 {
            balances.pop_front()
        } else {
            balances.front().copied()
        };
        Ok(balance.unwrap_or(0))
    }

    async fn get_token_account_balance(&self, token_account: &Pubkey) -> Result<u64, ChainError> {
        self.calls.lock().unwrap().push(format!("get_token_account_balance:{}", token_account));
        Ok(self.token_balance)
    }

    async fn get_mint_decimals(&self, mint: &Pubkey) -> Result<u8, ChainError> {
        self.calls.lock().unwrap().push(format!("get_mint_decimals:{}", mint));
        Ok(self.decimals)
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<String, ChainError> {
        self.calls.lock().unwrap().push("send_transaction".to_string());
        if self.reject_sends {
            return Err(ChainError::TransactionError("blockhash not found".to_string()));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0].to_string())
    }
}

/// Scripted reply of the trade API
#[derive(Debug, Clone)]
pub enum TradeReply {
    /// 200 with an unsigned transaction built from the request
    Transaction,
    /// Non-200 with an error body
    Rejected { status: u16, body: String },
}

/// Launchpad mock that builds valid unsigned transactions for each request
#[derive(Debug, Default)]
pub struct ScriptedLaunchpad {
    uploads: Arc<Mutex<Vec<MetadataUpload>>>,
    trades: Arc<Mutex<Vec<TradeRequest>>>,
    replies: Arc<Mutex<VecDeque<TradeReply>>>,
    fail_uploads: bool,
}

impl ScriptedLaunchpad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue trade replies; once exhausted every request succeeds
    pub fn with_replies(self, replies: Vec<TradeReply>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    pub fn failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    pub fn get_uploads(&self) -> Vec<MetadataUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn get_trades(&self) -> Vec<TradeRequest> {
        self.trades.lock().unwrap().clone()
    }

    pub fn trades_of(&self, action: TradeAction) -> Vec<TradeRequest> {
        self.get_trades()
            .into_iter()
            .filter(|trade| trade.action == action)
            .collect()
    }
}

#[async_trait]
impl LaunchpadPort for ScriptedLaunchpad {
    async fn upload_metadata(&self, upload: &MetadataUpload) -> Result<UploadedMetadata, LaunchpadError> {
        self.uploads.lock().unwrap().push(upload.clone());
        if self.fail_uploads {
            return Err(LaunchpadError::Rejected {
                status: 500,
                body: "upload failed".to_string(),
            });
        }
        Ok(UploadedMetadata {
            name: upload.name.clone(),
            symbol: upload.symbol.clone(),
            uri: format!("https://ipfs.io/ipfs/{}", upload.symbol),
        })
    }

    async fn trade_transaction(&self, request: &TradeRequest) -> Result<Vec<u8>, LaunchpadError> {
        self.trades.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TradeReply::Transaction);

        match reply {
            TradeReply::Rejected { status, body } => Err(LaunchpadError::Rejected { status, body }),
            TradeReply::Transaction => {
                let payer = Pubkey::from_str(&request.public_key)
                    .map_err(|e| LaunchpadError::ParseError(e.to_string()))?;
                let co_signers = match request.action {
                    TradeAction::Create => vec![Pubkey::from_str(&request.mint)
                        .map_err(|e| LaunchpadError::ParseError(e.to_string()))?],
                    TradeAction::Sell => Vec::new(),
                };
                Ok(unsigned_transaction(&payer, &co_signers))
            }
        }
    }
}

/// Prompt mock answering from a queue
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<String>>>,
    asked: Arc<Mutex<Vec<String>>>,
    said: Arc<Mutex<Vec<String>>>,
    progress: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        let prompt = Self::default();
        *prompt.answers.lock().unwrap() = answers.iter().map(|a| a.to_string()).collect();
        prompt
    }

    pub fn get_questions(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn get_output(&self) -> Vec<String> {
        self.said.lock().unwrap().clone()
    }

    pub fn get_progress(&self) -> Vec<String> {
        self.progress.lock().unwrap().clone()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> Result<String, PromptError> {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or(PromptError::Closed)
    }

    fn say(&self, line: &str) {
        self.said.lock().unwrap().push(line.to_string());
    }

    fn progress(&self, line: &str) {
        self.progress.lock().unwrap().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_transaction_round_trip() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let bytes = unsigned_transaction(&payer, &[mint]);

        let tx: VersionedTransaction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(tx.signatures.len(), 2);
        assert_eq!(tx.message.static_account_keys()[0], payer);
    }

    #[tokio::test]
    async fn test_scripted_chain_balances_repeat_last() {
        let chain = ScriptedChain::new().with_balances(&[1, 2]);
        let owner = Pubkey::new_unique();

        assert_eq!(chain.get_balance(&owner).await.unwrap(), 1);
        assert_eq!(chain.get_balance(&owner).await.unwrap(), 2);
        assert_eq!(chain.get_balance(&owner).await.unwrap(), 2);
        assert_eq!(chain.get_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_scripted_launchpad_replies() {
        let launchpad = ScriptedLaunchpad::new().with_replies(vec![TradeReply::Rejected {
            status: 400,
            body: "bad".to_string(),
        }]);
        let request = TradeRequest::sell(
            Pubkey::new_unique().to_string(),
            Pubkey::new_unique().to_string(),
            1,
            10,
            0.0001,
            "pump",
        );

        assert!(launchpad.trade_transaction(&request).await.is_err());
        assert!(launchpad.trade_transaction(&request).await.is_ok());
        assert_eq!(launchpad.trades_of(TradeAction::Sell).len(), 2);
    }

    #[test]
    fn test_scripted_prompt() {
        let prompt = ScriptedPrompt::new(&[" r ", "q"]);
        assert_eq!(prompt.ask("again?").unwrap(), "r");
        assert_eq!(prompt.ask("again?").unwrap(), "q");
        assert!(matches!(prompt.ask("again?"), Err(PromptError::Closed)));
        assert_eq!(prompt.get_questions().len(), 3);
    }
}
