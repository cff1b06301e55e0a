//! The signed-in team user.

use crate::coordinator::{TeamCoordinator, Transition};
use crate::error::TeamResult;
use crate::switcher::WorkspacePointer;
use leapp_types::SignedInUser;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Status line returned when no user record is stored.
pub const NOT_LOGGED_IN: &str = "you're not logged in";

/// Public identity of the team workspace, kept next to the user record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamWorkspaceRecord {
    #[serde(rename = "publicRSAKey")]
    public_rsa_key: String,
    team_id: String,
    team_name: String,
}

impl TeamCoordinator {
    /// Authenticates with the team backend and stores the returned user.
    pub async fn sign_in(&self, email: &str, password: &str) -> TeamResult<SignedInUser> {
        let user = self.deps.user_provider.sign_in(email, password).await?;
        self.set_signed_in_user(user.clone()).await?;
        info!("signed in to team {}", user.team_name);
        Ok(user)
    }

    /// Persists `user` to the keychain and publishes it.
    pub async fn set_signed_in_user(&self, user: SignedInUser) -> TeamResult<()> {
        let app = &self.config.app_name;
        let raw = serde_json::to_string(&user)?;
        self.deps
            .key_store
            .save_secret(app, &self.config.signed_in_user_key, &raw)
            .await?;

        if !user.public_rsa_key.is_empty() {
            let record = serde_json::to_string(&TeamWorkspaceRecord {
                public_rsa_key: user.public_rsa_key.clone(),
                team_id: user.team_id.clone(),
                team_name: user.team_name.clone(),
            })?;
            self.deps
                .key_store
                .save_secret(app, &self.config.team_workspace_key, &record)
                .await?;
        }

        self.state.publish_signed_in_user(Some(user));
        Ok(())
    }

    /// Three-line report of the stored user, or [`NOT_LOGGED_IN`].
    pub async fn get_team_status(&self) -> TeamResult<String> {
        let Some(raw) = self
            .deps
            .key_store
            .get_secret(&self.config.app_name, &self.config.signed_in_user_key)
            .await?
        else {
            return Ok(NOT_LOGGED_IN.to_string());
        };
        let user: SignedInUser = serde_json::from_str(&raw)?;
        let status = if user.is_online() { "online" } else { "offline" };
        Ok(format!(
            "workspace: {}\nemail: {}\nstatus: {status}",
            user.team_name, user.email
        ))
    }

    /// Signs the current user out.
    ///
    /// With `lock`, only the user's key material and token are blanked; the
    /// identity stays published and nothing else changes. Otherwise a loaded
    /// team workspace is torn down, the device returns to its local
    /// workspace carrying the current global settings over, and the user
    /// record is deleted. The record is deleted and `None` published even if
    /// tearing down the team workspace fails; that failure is returned
    /// afterwards. A full sign-out is a workspace transition and is refused
    /// while another one runs.
    pub async fn sign_out(&self, lock: bool) -> TeamResult<()> {
        if lock {
            let Some(mut user) = self.state.signed_in_user() else {
                return Ok(());
            };
            user.lock();
            self.set_signed_in_user(user).await?;
            info!("team user locked");
            return Ok(());
        }
        let transition = self.begin_transition()?;
        self.sign_out_locked(&transition).await
    }

    pub(crate) async fn sign_out_locked(&self, transition: &Transition<'_>) -> TeamResult<()> {
        let Some(user) = self.state.signed_in_user() else {
            return Ok(());
        };
        let pointer = self.get_current_workspace_pointer().await?;

        let teardown = match pointer {
            WorkspacePointer::Team(_) => self.detach_team_workspace(transition, &user).await,
            WorkspacePointer::Local => Ok(()),
        };
        if let Err(e) = &teardown {
            warn!("team workspace teardown failed during sign-out: {e}");
        }

        let app = &self.config.app_name;
        let deleted = self
            .deps
            .key_store
            .delete_secret(app, &self.config.signed_in_user_key)
            .await;
        let record_deleted = self
            .deps
            .key_store
            .delete_secret(app, &self.config.team_workspace_key)
            .await;
        self.state.publish_signed_in_user(None);
        info!("signed out of team {}", user.team_name);

        teardown?;
        deleted?;
        record_deleted?;
        Ok(())
    }

    /// The stored user record. A record that does not parse reads as absent.
    pub(crate) async fn read_persisted_user(&self) -> TeamResult<Option<SignedInUser>> {
        let raw = self
            .deps
            .key_store
            .get_secret(&self.config.app_name, &self.config.signed_in_user_key)
            .await?;
        Ok(raw.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("stored team user is malformed: {e}");
                None
            }
        }))
    }

    async fn detach_team_workspace(
        &self,
        transition: &Transition<'_>,
        user: &SignedInUser,
    ) -> TeamResult<()> {
        let store = &self.deps.workspace_store;
        let settings = store.extract_global_settings()?;
        match self.load_and_decrypt_workspace(Some(user)) {
            Ok(()) => self.delete_current_workspace_locked(transition).await?,
            Err(e) => {
                warn!("team workspace unreadable, discarding its lock file: {e}");
                store.set_workspace_file_name(&self.get_team_lock_file_name(&user.team_id))?;
                store.remove_workspace()?;
            }
        }
        self.set_local_workspace_locked(transition, Some(settings))
            .await
    }
}
