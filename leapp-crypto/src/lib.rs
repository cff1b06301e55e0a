//! Workspace key material and encryption for Leapp.
//!
//! Leapp keeps one encrypted workspace file per context:
//!
//! 1. **Local workspace**: keyed by a stable device identifier, so the
//!    file only opens on the machine that wrote it.
//!
//! 2. **Team workspace**: keyed by material taken from the signed-in
//!    user's team record. Signing out discards the key; the file becomes
//!    unreadable until the user signs in again.
//!
//! Key material of either kind is hashed into a 256-bit [`WorkspaceKey`]
//! and used with ChaCha20-Poly1305. RSA key pairs held by the signed-in
//! user are imported here for the secrets provider but never used to
//! encrypt workspace files.

mod cipher;
mod error;
mod key;
pub mod rsa;

pub use cipher::{decrypt, encrypt, EncryptedData, NONCE_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{WorkspaceKey, KEY_SIZE};
pub use rsa::{import_rsa_keys, RsaKeyMaterial, RsaKeyPair};
