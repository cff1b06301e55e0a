use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("keychain error: {0}")]
    Keychain(String),

    #[error("workspace encryption key not set")]
    KeyNotSet,

    #[error("workspace store lock poisoned: {0}")]
    Lock(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] leapp_crypto::CryptoError),
}
