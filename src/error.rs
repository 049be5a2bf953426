//! Error types for TallyChain

use crate::transaction::AccountId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),
    #[error("Blockchain is already initialized")]
    AlreadyInitialized,
    #[error("Sealing gave up after {attempts} nonce attempts")]
    SealingTimeout { attempts: u64 },
    #[error("Invalid block linkage")]
    InvalidBlockLinkage,
    #[error("Invalid proof of work")]
    InvalidProofOfWork,
    #[error("Invalid block: {0}")]
    InvalidBlock(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigParse(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
