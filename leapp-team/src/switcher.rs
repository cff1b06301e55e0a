//! Switching between the local workspace and a team workspace.

use crate::coordinator::{TeamCoordinator, Transition};
use crate::error::{TeamError, TeamResult};
use crate::reconciler::ReconcilePass;
use leapp_types::{GlobalSettings, SessionType, WorkspaceIdentity};
use tracing::{debug, error, info};

/// Which workspace the device is on, as stored in the keychain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspacePointer {
    Local,
    /// A team, by name.
    Team(String),
}

impl WorkspacePointer {
    /// Reads a stored pointer. A missing or empty value means local.
    pub fn from_stored(value: Option<&str>, local: &str) -> Self {
        match value {
            None => WorkspacePointer::Local,
            Some(v) if v.is_empty() || v == local => WorkspacePointer::Local,
            Some(team) => WorkspacePointer::Team(team.to_string()),
        }
    }

    pub fn as_stored<'a>(&'a self, local: &'a str) -> &'a str {
        match self {
            WorkspacePointer::Local => local,
            WorkspacePointer::Team(team) => team,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, WorkspacePointer::Local)
    }
}

impl TeamCoordinator {
    pub async fn get_current_workspace_pointer(&self) -> TeamResult<WorkspacePointer> {
        let stored = self
            .deps
            .key_store
            .get_secret(&self.config.app_name, &self.config.current_workspace_key)
            .await?;
        Ok(WorkspacePointer::from_stored(
            stored.as_deref(),
            &self.config.local_workspace_name,
        ))
    }

    pub async fn set_current_workspace_pointer(&self, pointer: &WorkspacePointer) -> TeamResult<()> {
        let value = pointer.as_stored(&self.config.local_workspace_name);
        self.deps
            .key_store
            .save_secret(&self.config.app_name, &self.config.current_workspace_key, value)
            .await?;
        Ok(())
    }

    /// Restores the workspace recorded in the keychain, typically at startup.
    ///
    /// The stored user is republished as-is first. For a team workspace the
    /// secrets are synced; if that fails the user is signed out so the device
    /// never stays authenticated against a half-synced workspace.
    pub async fn set_current_workspace(&self, reload_only: bool) -> TeamResult<()> {
        let transition = self.begin_transition()?;
        let user = self.read_persisted_user().await?;
        self.state.publish_signed_in_user(user);

        match self.get_current_workspace_pointer().await? {
            WorkspacePointer::Local => self.set_local_workspace_locked(&transition, None).await,
            WorkspacePointer::Team(team) => {
                match self.sync_secrets_locked(&transition, reload_only).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        error!("sync of team workspace {team} failed, signing out: {e}");
                        self.sign_out_locked(&transition).await
                    }
                }
            }
        }
    }

    /// Switches to the local workspace. When `global_settings` is given it is
    /// applied to the local document before the switch is published.
    pub async fn set_local_workspace(&self, global_settings: Option<GlobalSettings>) -> TeamResult<()> {
        let transition = self.begin_transition()?;
        self.set_local_workspace_locked(&transition, global_settings)
            .await
    }

    pub(crate) async fn set_local_workspace_locked(
        &self,
        transition: &Transition<'_>,
        global_settings: Option<GlobalSettings>,
    ) -> TeamResult<()> {
        self.set_current_workspace_pointer(&WorkspacePointer::Local)
            .await?;
        if let Some(settings) = global_settings {
            self.load_and_decrypt_workspace(None)?;
            self.deps.workspace_store.apply_global_settings(&settings)?;
        }
        self.refresh_workspace_state_locked(transition, None).await
    }

    /// Loads the workspace the pointer names and publishes its identity.
    pub async fn refresh_workspace_state(&self) -> TeamResult<()> {
        let transition = self.begin_transition()?;
        self.refresh_workspace_state_locked(&transition, None).await
    }

    /// As [`Self::refresh_workspace_state`]; for a team workspace, `pass`
    /// then runs against the freshly pointed store before the transition
    /// ends.
    pub(crate) async fn refresh_workspace_state_locked(
        &self,
        _transition: &Transition<'_>,
        pass: Option<ReconcilePass>,
    ) -> TeamResult<()> {
        match self.get_current_workspace_pointer().await? {
            WorkspacePointer::Local => {
                self.load_and_decrypt_workspace(None)?;
                let user = self.read_persisted_user().await?;
                self.state.publish_signed_in_user(user);
                self.state.publish_workspace(WorkspaceIdentity {
                    name: self.config.local_workspace_name.clone(),
                    id: self.config.local_workspace_id.clone(),
                });
                self.state.notify_reload();
                debug!("local workspace loaded");
            }
            WorkspacePointer::Team(team) => {
                let user = self.state.signed_in_user().ok_or_else(|| {
                    TeamError::Authentication(format!("no signed-in user for team {team}"))
                })?;
                self.load_and_decrypt_workspace(Some(&user))?;
                self.state.publish_workspace(WorkspaceIdentity {
                    name: user.team_name.clone(),
                    id: user.team_id.clone(),
                });
                self.state.notify_reload();
                debug!("team workspace {team} loaded");
                if let Some(pass) = pass {
                    self.reconcile(&user, pass).await?;
                }
            }
        }
        Ok(())
    }

    /// Logs out every integration and deletes every federated session of the
    /// loaded team workspace, then removes the document. The local workspace
    /// is never deleted.
    pub async fn delete_current_workspace(&self) -> TeamResult<()> {
        let transition = self.begin_transition()?;
        self.delete_current_workspace_locked(&transition).await
    }

    pub(crate) async fn delete_current_workspace_locked(
        &self,
        _transition: &Transition<'_>,
    ) -> TeamResult<()> {
        if self.get_current_workspace_pointer().await?.is_local() {
            debug!("refusing to delete the local workspace");
            return Ok(());
        }
        let store = &self.deps.workspace_store;
        let workspace = store.get_workspace()?;

        for integration in workspace.integrations() {
            self.deps
                .integration_factory
                .get_integration_service(integration.integration_type())
                .logout(integration.id())
                .await?;
        }
        for session in workspace
            .sessions
            .iter()
            .filter(|s| s.session_type() == SessionType::AwsIamRoleFederated)
        {
            self.deps
                .session_factory
                .get_session_service(SessionType::AwsIamRoleFederated)
                .delete(session.session_id())
                .await?;
        }

        store.remove_workspace()?;
        info!("team workspace removed");
        Ok(())
    }

    /// Leaves the team workspace for the local one, keeping global settings.
    pub async fn switch_to_local_workspace(&self) -> TeamResult<()> {
        let transition = self.begin_transition()?;
        let settings = self.deps.workspace_store.extract_global_settings()?;
        self.delete_current_workspace_locked(&transition).await?;
        self.set_local_workspace_locked(&transition, Some(settings))
            .await
    }
}
