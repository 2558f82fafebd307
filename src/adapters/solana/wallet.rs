use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};
use thiserror::Error;

use crate::domain::WalletRecord;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid base58 secret: {0}")]
    InvalidEncoding(String),
    #[error("Invalid keypair bytes: {0}")]
    InvalidKeypair(String),
    #[error("Stored public key {stored} does not match secret ({derived})")]
    PublicKeyMismatch { stored: String, derived: String },
    #[error("Failed to deserialize transaction: {0}")]
    DecodeError(String),
    #[error("Failed to sign transaction: {0}")]
    SigningError(String),
}

/// Signing wallet built from a stored record
pub struct WalletManager {
    keypair: Keypair,
}

impl WalletManager {
    /// Load keypair from a base58-encoded 64-byte secret
    pub fn from_base58(secret: &str) -> Result<Self, WalletError> {
        let bytes = bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| WalletError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Load keypair from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let keypair = Keypair::try_from(bytes)
            .map_err(|e| WalletError::InvalidKeypair(e.to_string()))?;

        Ok(Self { keypair })
    }

    /// Load from a store record, checking the stored public key
    pub fn from_record(record: &WalletRecord) -> Result<Self, WalletError> {
        let wallet = Self::from_base58(&record.private_key)?;
        if wallet.public_key() != record.public_key {
            return Err(WalletError::PublicKeyMismatch {
                stored: record.public_key.clone(),
                derived: wallet.public_key(),
            });
        }
        Ok(wallet)
    }

    /// Create a new random keypair
    pub fn new_random() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    /// Get the public key as a string
    pub fn public_key(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    /// Get the public key as Pubkey
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Get keypair reference (for co-signing with other keypairs)
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// Export the secret as base58 (use with caution)
    pub fn to_base58(&self) -> String {
        bs58::encode(self.keypair.to_bytes()).into_string()
    }
}

// Keypair is deliberately not Clone upstream
impl Clone for WalletManager {
    fn clone(&self) -> Self {
        Self {
            keypair: self.keypair.insecure_clone(),
        }
    }
}

/// Deserialize an unsigned transaction returned by the trade API
pub fn decode_transaction(bytes: &[u8]) -> Result<VersionedTransaction, WalletError> {
    bincode::deserialize(bytes).map_err(|e| WalletError::DecodeError(e.to_string()))
}

/// Sign a transaction with every required keypair, replacing its placeholder signatures
pub fn sign_transaction(
    unsigned: VersionedTransaction,
    signers: &[&Keypair],
) -> Result<VersionedTransaction, WalletError> {
    VersionedTransaction::try_new(unsigned.message, signers)
        .map_err(|e| WalletError::SigningError(e.to_string()))
}
