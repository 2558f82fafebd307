//! Wallet Store
//!
//! Persists named keypairs to a local JSON file of the form
//! `{ "<name>": { "publicKey": "...", "privateKey": "<base58>" } }`.
//! The file is read and overwritten wholesale.

use serde::{Deserialize, Serialize};
use solana_sdk::signature::{Keypair, Signer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default wallet store file name
pub const DEFAULT_WALLET_FILE: &str = "stored_wallets.json";

#[derive(Debug, Error)]
pub enum WalletStoreError {
    #[error("Failed to serialize wallet store: {0}")]
    SerializationError(String),

    #[error("Failed to write wallet store: {0}")]
    WriteError(String),

    #[error("Failed to create directory: {0}")]
    DirectoryError(String),
}

/// Persisted form of one wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWallet {
    pub public_key: String,
    /// Base58-encoded 64-byte keypair
    pub private_key: String,
}

/// A named wallet
#[derive(Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub name: String,
    pub public_key: String,
    pub private_key: String,
}

impl WalletRecord {
    pub fn from_stored(name: impl Into<String>, stored: StoredWallet) -> Self {
        Self {
            name: name.into(),
            public_key: stored.public_key,
            private_key: stored.private_key,
        }
    }
}

// Keep the secret out of logs
impl std::fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletRecord")
            .field("name", &self.name)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Name-keyed wallet mapping
pub type WalletMap = BTreeMap<String, StoredWallet>;

/// File-backed wallet store
#[derive(Debug, Clone)]
pub struct WalletStore {
    path: PathBuf,
}

impl WalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored wallets. A missing, empty or unreadable store is an empty mapping.
    pub fn load(&self) -> WalletMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Wallet store {} not readable: {}", self.path.display(), e);
                return WalletMap::new();
            }
        };

        if content.trim().is_empty() {
            return WalletMap::new();
        }

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Wallet store {} is corrupted, treating as empty: {}", self.path.display(), e);
            WalletMap::new()
        })
    }

    /// Overwrite the store. Writes a sibling temp file and renames it into place.
    pub fn save(&self, wallets: &WalletMap) -> Result<(), WalletStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| WalletStoreError::DirectoryError(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(wallets)
            .map_err(|e| WalletStoreError::SerializationError(e.to_string()))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, content).map_err(|e| WalletStoreError::WriteError(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            WalletStoreError::WriteError(e.to_string())
        })?;

        Ok(())
    }

    /// Generate a keypair, store it under `name` and return it.
    ///
    /// An existing wallet with the same name is replaced.
    pub fn generate(&self, name: &str) -> Result<WalletRecord, WalletStoreError> {
        let keypair = Keypair::new();
        let stored = StoredWallet {
            public_key: keypair.pubkey().to_string(),
            private_key: bs58::encode(keypair.to_bytes()).into_string(),
        };

        let mut wallets = self.load();
        if wallets.contains_key(name) {
            tracing::warn!("Overwriting existing wallet \"{}\"", name);
        }
        wallets.insert(name.to_string(), stored.clone());
        self.save(&wallets)?;

        tracing::info!("Wallet \"{}\" stored ({})", name, stored.public_key);
        Ok(WalletRecord::from_stored(name, stored))
    }

    /// Look up a wallet by name
    pub fn get(&self, name: &str) -> Option<WalletRecord> {
        self.load()
            .remove(name)
            .map(|stored| WalletRecord::from_stored(name, stored))
    }

    /// Stored wallet names in enumeration order
    pub fn names(&self) -> Vec<String> {
        self.load().into_keys().collect()
    }

    /// Remove a wallet. Returns whether it existed; the file is untouched when it did not.
    pub fn delete(&self, name: &str) -> Result<bool, WalletStoreError> {
        let mut wallets = self.load();
        if wallets.remove(name).is_none() {
            return Ok(false);
        }

        self.save(&wallets)?;
        tracing::info!("Wallet \"{}\" deleted", name);
        Ok(true)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_WALLET_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
