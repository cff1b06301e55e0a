use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: wrong key or corrupted data")]
    Decryption,

    #[error("invalid key material: {0}")]
    InvalidKey(String),

    #[error("invalid key encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
}
