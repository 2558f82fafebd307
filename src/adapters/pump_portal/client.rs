//! PumpPortal API Client
//!
//! HTTP client for the pump.fun IPFS metadata endpoint and the PumpPortal
//! local-trade endpoint, which returns unsigned transactions for local signing.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use crate::ports::launchpad::{
    LaunchpadError, LaunchpadPort, MetadataUpload, TradeRequest, UploadedMetadata,
};
use super::types::{logo_mime, MetadataResponse};

/// PumpPortal client configuration
#[derive(Debug, Clone)]
pub struct PumpPortalConfig {
    /// Metadata upload endpoint
    pub metadata_url: String,
    /// Local-trade endpoint
    pub trade_url: String,
    /// Request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl Default for PumpPortalConfig {
    fn default() -> Self {
        Self {
            metadata_url: "https://pump.fun/api/ipfs".to_string(),
            trade_url: "https://pumpportal.fun/api/trade-local".to_string(),
            timeout: None,
        }
    }
}

/// PumpPortal / pump.fun client
#[derive(Debug, Clone)]
pub struct PumpPortalClient {
    config: PumpPortalConfig,
    http: Client,
}

impl PumpPortalClient {
    /// Create a new client with default endpoints
    pub fn new() -> Result<Self, LaunchpadError> {
        Self::with_config(PumpPortalConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: PumpPortalConfig) -> Result<Self, LaunchpadError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LaunchpadError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &PumpPortalConfig {
        &self.config
    }

    fn build_form(upload: &MetadataUpload) -> Result<Form, LaunchpadError> {
        let file = Part::bytes(upload.file.clone())
            .file_name(upload.file_name.clone())
            .mime_str(logo_mime(&upload.file_name))
            .map_err(|e| LaunchpadError::HttpError(e.to_string()))?;

        Ok(Form::new()
            .part("file", file)
            .text("name", upload.name.clone())
            .text("symbol", upload.symbol.clone())
            .text("description", upload.description.clone())
            .text("twitter", upload.twitter.clone())
            .text("telegram", upload.telegram.clone())
            .text("website", upload.website.clone())
            .text("showName", upload.show_name.to_string()))
    }
}

#[async_trait]
impl LaunchpadPort for PumpPortalClient {
    async fn upload_metadata(&self, upload: &MetadataUpload) -> Result<UploadedMetadata, LaunchpadError> {
        let form = Self::build_form(upload)?;

        let response = self.http
            .post(&self.config.metadata_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LaunchpadError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LaunchpadError::Rejected { status: status.as_u16(), body });
        }

        let parsed: MetadataResponse = response
            .json()
            .await
            .map_err(|e| LaunchpadError::ParseError(format!("Invalid metadata response: {}", e)))?;

        tracing::debug!("Metadata uploaded: {}", parsed.metadata_uri);
        Ok(parsed.into())
    }

    async fn trade_transaction(&self, request: &TradeRequest) -> Result<Vec<u8>, LaunchpadError> {
        tracing::debug!(
            "Trade request: {:?} mint={} amount={:?}",
            request.action, request.mint, request.amount
        );

        let response = self.http
            .post(&self.config.trade_url)
            .json(request)
            .send()
            .await
            .map_err(|e| LaunchpadError::HttpError(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(LaunchpadError::Rejected { status: status.as_u16(), body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LaunchpadError::HttpError(e.to_string()))?;

        if bytes.is_empty() {
            return Err(LaunchpadError::EmptyTransaction);
        }

        Ok(bytes.to_vec())
    }
}
