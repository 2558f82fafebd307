//! Launchpad Port
//!
//! The metadata upload service and the local-trade API that returns
//! unsigned create/sell transactions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchpadError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),
    #[error("API returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("API returned an empty transaction")]
    EmptyTransaction,
}

/// Multipart metadata submission
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataUpload {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub twitter: String,
    pub telegram: String,
    pub website: String,
    pub show_name: bool,
    pub file_name: String,
    pub file: Vec<u8>,
}

/// Canonical metadata returned by the upload service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Create,
    Sell,
}

/// Amount sent to the trade API: a SOL number for creation, a token count string for selling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TradeAmount {
    Sol(f64),
    Tokens(String),
}

/// `tokenMetadata` object of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl From<UploadedMetadata> for TradeTokenMetadata {
    fn from(metadata: UploadedMetadata) -> Self {
        Self {
            name: metadata.name,
            symbol: metadata.symbol,
            uri: metadata.uri,
        }
    }
}

/// JSON body of a trade-local request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub public_key: String,
    pub action: TradeAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_metadata: Option<TradeTokenMetadata>,
    pub mint: String,
    /// "true" or "false", sent as a string
    pub denominated_in_sol: String,
    pub amount: TradeAmount,
    /// Percent
    pub slippage: u32,
    /// SOL
    pub priority_fee: f64,
    pub pool: String,
}

impl TradeRequest {
    /// Create a token and buy `amount_sol` worth of it
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        public_key: String,
        mint: String,
        metadata: TradeTokenMetadata,
        amount_sol: f64,
        slippage: u32,
        priority_fee: f64,
        pool: impl Into<String>,
    ) -> Self {
        Self {
            public_key,
            action: TradeAction::Create,
            token_metadata: Some(metadata),
            mint,
            denominated_in_sol: "true".to_string(),
            amount: TradeAmount::Sol(amount_sol),
            slippage,
            priority_fee,
            pool: pool.into(),
        }
    }

    /// Sell `tokens` whole tokens of `mint`
    pub fn sell(
        public_key: String,
        mint: String,
        tokens: u64,
        slippage: u32,
        priority_fee: f64,
        pool: impl Into<String>,
    ) -> Self {
        Self {
            public_key,
            action: TradeAction::Sell,
            token_metadata: None,
            mint,
            denominated_in_sol: "false".to_string(),
            amount: TradeAmount::Tokens(tokens.to_string()),
            slippage,
            priority_fee,
            pool: pool.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LaunchpadPort: Send + Sync {
    /// Upload token metadata and logo, returning the canonical metadata URI
    async fn upload_metadata(&self, upload: &MetadataUpload) -> Result<UploadedMetadata, LaunchpadError>;

    /// Request a serialized unsigned transaction for a trade
    async fn trade_transaction(&self, request: &TradeRequest) -> Result<Vec<u8>, LaunchpadError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata() -> TradeTokenMetadata {
        TradeTokenMetadata {
            name: "Zephyr AI".to_string(),
            symbol: "ZPHR".to_string(),
            uri: "https://ipfs.io/ipfs/Qm123".to_string(),
        }
    }

    #[test]
    fn test_create_request_body() {
        let request = TradeRequest::create(
            "Creator111".to_string(),
            "Mint111".to_string(),
            metadata(),
            0.3,
            10,
            0.000005,
            "pump",
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "publicKey": "Creator111",
                "action": "create",
                "tokenMetadata": {
                    "name": "Zephyr AI",
                    "symbol": "ZPHR",
                    "uri": "https://ipfs.io/ipfs/Qm123"
                },
                "mint": "Mint111",
                "denominatedInSol": "true",
                "amount": 0.3,
                "slippage": 10,
                "priorityFee": 0.000005,
                "pool": "pump"
            })
        );
    }

    #[test]
    fn test_sell_request_body() {
        let request = TradeRequest::sell(
            "Creator111".to_string(),
            "Mint111".to_string(),
            34_512_346,
            10,
            0.000005,
            "pump",
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["action"], "sell");
        assert_eq!(body["amount"], "34512346");
        assert_eq!(body["denominatedInSol"], "false");
        assert!(body.get("tokenMetadata").is_none());
    }

    #[test]
    fn test_uploaded_metadata_into_trade_metadata() {
        let uploaded = UploadedMetadata {
            name: "A".to_string(),
            symbol: "B".to_string(),
            uri: "C".to_string(),
        };
        let converted = TradeTokenMetadata::from(uploaded);
        assert_eq!(converted.uri, "C");
    }
}
