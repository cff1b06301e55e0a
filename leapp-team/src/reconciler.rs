//! Reconciliation of the remote secret list into the team workspace.
//!
//! Remote state wins: a full pass discards the team document and rebuilds
//! it from the secrets, keeping only the device's global settings.
//! Integrations are replaced by delete-then-create. A failure between the
//! two leaves the integration absent until the next successful sync.

use crate::coordinator::{TeamCoordinator, Transition};
use crate::error::{TeamError, TeamResult};
use crate::jwt::is_jwt_token_expired;
use crate::services::SessionService;
use crate::switcher::WorkspacePointer;
use leapp_types::{
    AwsIamRoleChainedSessionRequest, AwsIamRoleChainedSessionSecret,
    AwsIamRoleFederatedSessionRequest, AwsIamUserSessionRequest, AwsSsoIntegrationRequest,
    AzureIntegrationRequest, GlobalSettings, IntegrationRequest, IntegrationSecret,
    IntegrationType, SecretKind, SessionRequest, SessionSecret, SessionType, SignedInUser,
};
use tracing::{debug, info, warn};

/// What a reconciliation pass needs once the team workspace is loaded.
#[derive(Debug, Clone)]
pub(crate) struct ReconcilePass {
    /// Settings captured from the local workspace before the switch.
    pub global_settings: GlobalSettings,
    /// Keep the existing document instead of rebuilding it.
    pub read_only: bool,
}

#[derive(Debug, Default)]
struct SyncCounts {
    integrations: usize,
    sessions: usize,
    skipped: usize,
}

/// A chained session secret naming neither a parent session nor an SSO
/// integration cannot be resolved and is dropped.
pub fn is_orphaned_chained_session(secret: &AwsIamRoleChainedSessionSecret) -> bool {
    secret.is_orphaned()
}

fn integration_sync_error(id: &str, err: TeamError) -> TeamError {
    TeamError::IntegrationSync {
        id: id.to_string(),
        reason: err.to_string(),
    }
}

impl TeamCoordinator {
    /// Mirrors the signed-in team's secrets into its workspace.
    ///
    /// Without a user, or with an expired token, the device is signed out
    /// instead. With `read_only` the existing team document is updated in
    /// place rather than rebuilt.
    pub async fn sync_secrets(&self, read_only: bool) -> TeamResult<()> {
        let transition = self.begin_transition()?;
        self.sync_secrets_locked(&transition, read_only).await
    }

    pub(crate) async fn sync_secrets_locked(
        &self,
        transition: &Transition<'_>,
        read_only: bool,
    ) -> TeamResult<()> {
        self.load_and_decrypt_workspace(None)?;
        let global_settings = self.deps.workspace_store.extract_global_settings()?;

        let user = match self.state.signed_in_user() {
            Some(user) if !is_jwt_token_expired(&user.access_token) => user,
            Some(_) => {
                info!("team access token expired, signing out");
                return self.sign_out_locked(transition).await;
            }
            None => {
                debug!("no signed-in team user, signing out");
                return self.sign_out_locked(transition).await;
            }
        };

        self.set_current_workspace_pointer(&WorkspacePointer::Team(user.team_name.clone()))
            .await?;
        self.refresh_workspace_state_locked(
            transition,
            Some(ReconcilePass {
                global_settings,
                read_only,
            }),
        )
        .await
    }

    pub(crate) async fn reconcile(&self, user: &SignedInUser, pass: ReconcilePass) -> TeamResult<()> {
        let store = &self.deps.workspace_store;
        let keys = self.get_rsa_keys(user)?;
        let secrets = self.deps.secrets_provider.get_secrets(&keys).await?;
        info!(
            "reconciling {} secrets for team {} (read_only: {})",
            secrets.len(),
            user.team_name,
            pass.read_only
        );

        if !pass.read_only {
            store.remove_workspace()?;
            store.create_workspace()?;
            store.apply_global_settings(&pass.global_settings)?;
        }

        let mut counts = SyncCounts::default();
        for secret in &secrets {
            match secret.kind() {
                SecretKind::Integration(integration) => {
                    self.sync_integration_secret(integration).await?;
                    counts.integrations += 1;
                }
                SecretKind::Session(session) => {
                    if self.sync_sessions_secret(session).await? {
                        counts.sessions += 1;
                    } else {
                        counts.skipped += 1;
                    }
                }
            }
        }

        store.reload_workspace()?;
        self.state.notify_reload();
        info!(
            "team {} reconciled: {} integrations, {} sessions, {} skipped",
            user.team_name, counts.integrations, counts.sessions, counts.skipped
        );
        Ok(())
    }

    /// Replaces the local integration with the secret's id by one built from
    /// the secret.
    pub async fn sync_integration_secret(&self, secret: IntegrationSecret<'_>) -> TeamResult<()> {
        let (integration_type, request) = match secret {
            IntegrationSecret::AwsSso(s) => (
                IntegrationType::AwsSso,
                IntegrationRequest::AwsSso(AwsSsoIntegrationRequest {
                    alias: s.alias.clone(),
                    portal_url: s.portal_url.clone(),
                    region: s.region.clone(),
                    browser_opening: s.browser_opening.clone(),
                }),
            ),
            IntegrationSecret::Azure(s) => (
                IntegrationType::Azure,
                IntegrationRequest::Azure(AzureIntegrationRequest {
                    alias: s.alias.clone(),
                    tenant_id: s.tenant_id.clone(),
                    region: s.region.clone(),
                }),
            ),
        };
        let id = secret.id();
        let service = self.deps.integration_factory.get_integration_service(integration_type);

        let existing = service
            .get_integration(id)
            .await
            .map_err(|e| integration_sync_error(id, e))?;
        if let Some(existing) = existing {
            service
                .delete_integration(existing.id())
                .await
                .map_err(|e| integration_sync_error(id, e))?;
        }
        service
            .create_integration(request, id)
            .await
            .map_err(|e| integration_sync_error(id, e))?;
        debug!("integration {id} synced");
        Ok(())
    }

    /// Creates the local session a secret describes. Returns `false` when
    /// the secret was skipped as an orphaned chain.
    pub async fn sync_sessions_secret(&self, secret: SessionSecret<'_>) -> TeamResult<bool> {
        let factory = &self.deps.session_factory;
        match secret {
            SessionSecret::AwsIamUser(s) => {
                let service = factory.get_session_service(SessionType::AwsIamUser);
                let profile_id = self
                    .setup_aws_session(service.as_ref(), &s.session_id, &s.profile_name)
                    .await?;
                service
                    .create(SessionRequest::AwsIamUser(AwsIamUserSessionRequest {
                        session_name: s.session_name.clone(),
                        access_key: s.access_key.clone(),
                        secret_key: s.secret_key.clone(),
                        region: s.region.clone(),
                        mfa_device: s.mfa_device.clone(),
                        profile_id,
                        session_id: s.session_id.clone(),
                    }))
                    .await?;
            }
            SessionSecret::AwsIamRoleChained(s) => {
                if is_orphaned_chained_session(s) {
                    warn!("skipping orphaned chained session {}", s.session_id);
                    return Ok(false);
                }
                let service = factory.get_session_service(SessionType::AwsIamRoleChained);
                // Resolve first: a missing parent must not cost the existing session.
                let parent_session_id = self.get_assumer_session_id(s).await?;
                let profile_id = self
                    .setup_aws_session(service.as_ref(), &s.session_id, &s.profile_name)
                    .await?;
                service
                    .create(SessionRequest::AwsIamRoleChained(AwsIamRoleChainedSessionRequest {
                        session_name: s.session_name.clone(),
                        region: s.region.clone(),
                        role_arn: s.role_arn.clone(),
                        profile_id,
                        parent_session_id,
                        role_session_name: s.role_session_name.clone(),
                        session_id: s.session_id.clone(),
                    }))
                    .await?;
            }
            SessionSecret::AwsIamRoleFederated(s) => {
                // Federated secrets carry no assumer fields; the SAML URL stands in for a parent.
                let service = factory.get_session_service(SessionType::AwsIamRoleFederated);
                let profile_id = self
                    .setup_aws_session(service.as_ref(), &s.session_id, &s.profile_name)
                    .await?;
                let idp_url = self.deps.idp_urls.merge_idp_url(&s.saml_url)?;
                service
                    .create(SessionRequest::AwsIamRoleFederated(AwsIamRoleFederatedSessionRequest {
                        session_name: s.session_name.clone(),
                        region: s.region.clone(),
                        role_arn: s.role_arn.clone(),
                        profile_id,
                        idp_url: idp_url.id,
                        idp_arn: s.idp_arn.clone(),
                        session_id: s.session_id.clone(),
                    }))
                    .await?;
            }
        }
        debug!("session {} synced", secret.session_id());
        Ok(true)
    }

    /// Deletes any local session with `session_id`, then returns the id of
    /// the profile called `profile_name`, creating it if needed.
    pub async fn setup_aws_session(
        &self,
        session_service: &dyn SessionService,
        session_id: &str,
        profile_name: &str,
    ) -> TeamResult<String> {
        if self
            .deps
            .session_repository
            .get_session_by_id(session_id)?
            .is_some()
        {
            session_service.delete(session_id).await?;
        }
        Ok(self.deps.named_profiles.merge_profile_name(profile_name)?.id)
    }
}
