use crate::error::{CryptoError, CryptoResult};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a workspace key in bytes.
pub const KEY_SIZE: usize = 32;

/// Symmetric key protecting one workspace file.
///
/// Derived by hashing the context's key material (device id for the local
/// workspace, team key material for a team workspace). Zeroed on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct WorkspaceKey {
    bytes: [u8; KEY_SIZE],
}

impl WorkspaceKey {
    /// Derives a key from arbitrary non-empty key material.
    pub fn from_material(material: &str) -> CryptoResult<Self> {
        if material.is_empty() {
            return Err(CryptoError::InvalidKey("empty key material".to_string()));
        }
        let digest = Sha256::digest(material.as_bytes());
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&digest);
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for WorkspaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WorkspaceKey(..)")
    }
}
