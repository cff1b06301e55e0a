//! Key material and lock-file selection per workspace context.

use crate::coordinator::TeamCoordinator;
use crate::error::TeamResult;
use leapp_crypto::{RsaKeyMaterial, RsaKeyPair, WorkspaceKey};
use leapp_types::SignedInUser;
use tracing::debug;

impl TeamCoordinator {
    /// Points the workspace store at the local or a team lock file, sets the
    /// matching key, and reloads.
    ///
    /// Without a user the device identifier is the key material. With one,
    /// the user's public key field is used verbatim as key material and the
    /// lock file is named after the team id.
    pub fn load_and_decrypt_workspace(&self, user: Option<&SignedInUser>) -> TeamResult<()> {
        let store = &self.deps.workspace_store;
        let (file_name, key) = match user {
            None => (
                self.config.local_lock_file_name(),
                WorkspaceKey::from_material(&self.deps.machine_id)?,
            ),
            Some(user) => (
                self.get_team_lock_file_name(&user.team_id),
                WorkspaceKey::from_material(&user.public_rsa_key)?,
            ),
        };
        debug!("loading workspace {file_name}");
        store.set_workspace_file_name(&file_name)?;
        store.set_encryption_key(key)?;
        store.reload_workspace()?;
        Ok(())
    }

    pub fn get_team_lock_file_name(&self, id: &str) -> String {
        self.config.team_lock_file_name(id)
    }

    pub fn get_rsa_keys(&self, user: &SignedInUser) -> TeamResult<RsaKeyPair> {
        self.deps.key_importer.import_rsa_keys(RsaKeyMaterial {
            private_key: &user.private_rsa_key,
            public_key: &user.public_rsa_key,
        })
    }
}
