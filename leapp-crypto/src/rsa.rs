//! Import of the signed-in user's RSA key pair.
//!
//! Keys arrive from the team backend as PEM text stored on the user record.
//! Import only validates and decodes them to DER; the asymmetric
//! operations themselves belong to the secrets provider.

use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use zeroize::Zeroizing;

/// PEM-encoded halves of a key pair, as stored on the user record.
#[derive(Clone, Copy)]
pub struct RsaKeyMaterial<'a> {
    pub private_key: &'a str,
    pub public_key: &'a str,
}

/// A decoded RSA key pair. The private half is zeroed on drop.
#[derive(Clone)]
pub struct RsaKeyPair {
    private_der: Zeroizing<Vec<u8>>,
    public_der: Vec<u8>,
}

impl RsaKeyPair {
    pub fn private_key_der(&self) -> &[u8] {
        &self.private_der
    }

    pub fn public_key_der(&self) -> &[u8] {
        &self.public_der
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("public_key_len", &self.public_der.len())
            .finish_non_exhaustive()
    }
}

/// Decodes both halves of a PEM key pair.
pub fn import_rsa_keys(material: RsaKeyMaterial<'_>) -> CryptoResult<RsaKeyPair> {
    let private_der = Zeroizing::new(decode_pem("private", material.private_key)?);
    let public_der = decode_pem("public", material.public_key)?;
    Ok(RsaKeyPair {
        private_der,
        public_der,
    })
}

/// Strips PEM armor lines and decodes the base64 body. Bare base64 without
/// armor is accepted as well.
fn decode_pem(label: &str, pem: &str) -> CryptoResult<Vec<u8>> {
    let body: String = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect();

    if body.is_empty() {
        return Err(CryptoError::InvalidKey(format!("{label} RSA key is empty")));
    }
    Ok(STANDARD.decode(body)?)
}
