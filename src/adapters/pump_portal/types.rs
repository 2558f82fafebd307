//! PumpPortal / pump.fun wire types

use serde::{Deserialize, Serialize};

use crate::ports::launchpad::UploadedMetadata;

/// `metadata` object of the IPFS upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataFields {
    pub name: String,
    pub symbol: String,
}

/// Response of `POST /api/ipfs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub metadata: MetadataFields,
    pub metadata_uri: String,
}

impl From<MetadataResponse> for UploadedMetadata {
    fn from(response: MetadataResponse) -> Self {
        Self {
            name: response.metadata.name,
            symbol: response.metadata.symbol,
            uri: response.metadata_uri,
        }
    }
}

/// Guess the MIME type of a logo from its file name
pub fn logo_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/png"
    }
}
