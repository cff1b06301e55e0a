//! Secure key/value storage scoped by application name.

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Secure storage for small secrets (tokens, key material, pointers).
///
/// Every entry is addressed by a `service` (the application name) and a
/// `key`. Reads of a missing entry return `Ok(None)`; deleting a missing
/// entry succeeds.
#[async_trait]
pub trait KeyMaterialStore: Send + Sync {
    async fn get_secret(&self, service: &str, key: &str) -> StorageResult<Option<String>>;

    async fn save_secret(&self, service: &str, key: &str, value: &str) -> StorageResult<()>;

    async fn delete_secret(&self, service: &str, key: &str) -> StorageResult<()>;
}

/// Process-local secret storage.
#[derive(Default)]
pub struct InMemoryKeyStore {
    secrets: RwLock<HashMap<(String, String), String>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyMaterialStore for InMemoryKeyStore {
    async fn get_secret(&self, service: &str, key: &str) -> StorageResult<Option<String>> {
        Ok(self
            .secrets
            .read()
            .await
            .get(&(service.to_string(), key.to_string()))
            .cloned())
    }

    async fn save_secret(&self, service: &str, key: &str, value: &str) -> StorageResult<()> {
        self.secrets
            .write()
            .await
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn delete_secret(&self, service: &str, key: &str) -> StorageResult<()> {
        self.secrets
            .write()
            .await
            .remove(&(service.to_string(), key.to_string()));
        Ok(())
    }
}

/// OS keychain storage via the `keyring` crate.
///
/// Keychain calls block, so each one runs on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }
}

fn keychain_err(err: keyring::Error) -> StorageError {
    StorageError::Keychain(err.to_string())
}

async fn run_blocking<T, F>(f: F) -> StorageResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Keychain(format!("keychain task failed: {e}")))?
}

#[async_trait]
impl KeyMaterialStore for KeyringStore {
    async fn get_secret(&self, service: &str, key: &str) -> StorageResult<Option<String>> {
        let (service, key) = (service.to_string(), key.to_string());
        run_blocking(move || {
            let entry = keyring::Entry::new(&service, &key).map_err(keychain_err)?;
            match entry.get_password() {
                Ok(value) => Ok(Some(value)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(keychain_err(e)),
            }
        })
        .await
    }

    async fn save_secret(&self, service: &str, key: &str, value: &str) -> StorageResult<()> {
        let (service, key, value) = (service.to_string(), key.to_string(), value.to_string());
        run_blocking(move || {
            let entry = keyring::Entry::new(&service, &key).map_err(keychain_err)?;
            entry.set_password(&value).map_err(keychain_err)?;
            debug!("stored keychain entry {service}/{key}");
            Ok(())
        })
        .await
    }

    async fn delete_secret(&self, service: &str, key: &str) -> StorageResult<()> {
        let (service, key) = (service.to_string(), key.to_string());
        run_blocking(move || {
            let entry = keyring::Entry::new(&service, &key).map_err(keychain_err)?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(keychain_err(e)),
            }
        })
        .await
    }
}
