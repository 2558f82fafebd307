//! Mint Reference File
//!
//! Records the most recently created mint as `{ "mint": "<pubkey>" }` for the
//! operator. Writing it is best-effort and never fails a cycle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default mint reference file name
pub const DEFAULT_MINT_FILE: &str = "mint.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReference {
    pub mint: String,
}

/// Writer for the mint reference file
#[derive(Debug, Clone)]
pub struct MintReferenceFile {
    path: PathBuf,
}

impl MintReferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `mint`. Returns false (and logs) when the write fails.
    pub fn record(&self, mint: &str) -> bool {
        let reference = MintReference { mint: mint.to_string() };
        let result = serde_json::to_string_pretty(&reference)
            .map_err(|e| e.to_string())
            .and_then(|content| fs::write(&self.path, content).map_err(|e| e.to_string()));

        match result {
            Ok(()) => {
                tracing::info!("Mint address saved: {}", mint);
                true
            }
            Err(e) => {
                tracing::warn!("Could not write mint reference {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Read the last recorded mint, if any
    pub fn read(&self) -> Option<MintReference> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }
}
