//! Team workspace configuration.

use serde::{Deserialize, Serialize};

/// Names and paths shared by every team workspace operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Keychain service every secret is scoped under.
    pub app_name: String,

    /// Keychain key holding the JSON signed-in user.
    pub signed_in_user_key: String,

    /// Keychain key holding the workspace pointer.
    pub current_workspace_key: String,

    /// Keychain key for the per-team identity record.
    pub team_workspace_key: String,

    /// Directory of lock files, relative to the store's base directory.
    pub lock_file_dir: String,

    pub local_lock_file_name: String,

    pub local_workspace_name: String,

    pub local_workspace_id: String,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            app_name: "Leapp".to_string(),
            signed_in_user_key: "team-signed-in-user".to_string(),
            current_workspace_key: "current-workspace".to_string(),
            team_workspace_key: "team-workspace".to_string(),
            lock_file_dir: ".Leapp".to_string(),
            local_lock_file_name: "Leapp-lock.json".to_string(),
            local_workspace_name: "local".to_string(),
            local_workspace_id: "local".to_string(),
        }
    }
}

impl TeamConfig {
    /// Lock file of the team identified by `id`: `<dir>/Leapp-<id>-lock.json`.
    pub fn team_lock_file_name(&self, id: &str) -> String {
        format!("{}/Leapp-{id}-lock.json", self.lock_file_dir)
    }

    pub fn local_lock_file_name(&self) -> String {
        format!("{}/{}", self.lock_file_dir, self.local_lock_file_name)
    }
}
