//! Collaborators backed directly by the workspace store.
//!
//! These cover everything that only touches the workspace document and the
//! keychain. Cloud validation of sessions and SSO role discovery are left to
//! the app's own services; [`WorkspaceServices`] stands in for them on
//! headless devices and in tests.

use crate::error::{TeamError, TeamResult};
use crate::services::{
    IdpUrlService, IntegrationService, IntegrationServiceFactory, KeyImporter,
    NamedProfileService, SessionRepository, SessionService, SessionServiceFactory,
};
use async_trait::async_trait;
use leapp_crypto::{RsaKeyMaterial, RsaKeyPair};
use leapp_storage::{KeyMaterialStore, WorkspaceStore};
use leapp_types::{
    AwsSsoRoleSession, IdpUrl, Integration, IntegrationRequest, IntegrationType, NamedProfile,
    Session, SessionRequest, SessionType,
};
use std::sync::Arc;
use tracing::debug;

pub struct WorkspaceSessionRepository {
    store: Arc<dyn WorkspaceStore>,
}

impl WorkspaceSessionRepository {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }
}

impl SessionRepository for WorkspaceSessionRepository {
    fn get_session_by_id(&self, session_id: &str) -> TeamResult<Option<Session>> {
        Ok(self.store.get_workspace()?.session(session_id).cloned())
    }

    fn get_aws_sso_roles(&self) -> TeamResult<Vec<AwsSsoRoleSession>> {
        Ok(self.store.get_workspace()?.aws_sso_roles())
    }
}

pub struct WorkspaceProfiles {
    store: Arc<dyn WorkspaceStore>,
}

impl WorkspaceProfiles {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }
}

impl NamedProfileService for WorkspaceProfiles {
    fn merge_profile_name(&self, name: &str) -> TeamResult<NamedProfile> {
        if let Some(existing) = self.store.get_workspace()?.profile_by_name(name) {
            return Ok(existing.clone());
        }
        let profile = NamedProfile::new(name);
        self.store
            .update_workspace(&mut |ws| ws.profiles.push(profile.clone()))?;
        debug!("created named profile {name}");
        Ok(profile)
    }
}

pub struct WorkspaceIdpUrls {
    store: Arc<dyn WorkspaceStore>,
}

impl WorkspaceIdpUrls {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }
}

impl IdpUrlService for WorkspaceIdpUrls {
    fn merge_idp_url(&self, url: &str) -> TeamResult<IdpUrl> {
        if let Some(existing) = self.store.get_workspace()?.idp_url_by_url(url) {
            return Ok(existing.clone());
        }
        let idp_url = IdpUrl::new(url);
        self.store
            .update_workspace(&mut |ws| ws.idp_urls.push(idp_url.clone()))?;
        Ok(idp_url)
    }
}

/// Decodes PEM keys with [`leapp_crypto::import_rsa_keys`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PemKeyImporter;

impl KeyImporter for PemKeyImporter {
    fn import_rsa_keys(&self, material: RsaKeyMaterial<'_>) -> TeamResult<RsaKeyPair> {
        Ok(leapp_crypto::import_rsa_keys(material)?)
    }
}

/// Session and integration services that edit the workspace document
/// directly, with IAM user credentials kept in the key material store.
#[derive(Clone)]
pub struct WorkspaceServices {
    store: Arc<dyn WorkspaceStore>,
    key_store: Arc<dyn KeyMaterialStore>,
    app_name: String,
}

impl WorkspaceServices {
    pub fn new(
        store: Arc<dyn WorkspaceStore>,
        key_store: Arc<dyn KeyMaterialStore>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            key_store,
            app_name: app_name.into(),
        }
    }
}

pub fn access_key_id_secret_name(session_id: &str) -> String {
    format!("{session_id}-iam-user-aws-session-access-key-id")
}

pub fn secret_access_key_secret_name(session_id: &str) -> String {
    format!("{session_id}-iam-user-aws-session-secret-access-key")
}

#[async_trait]
impl SessionService for WorkspaceServices {
    async fn create(&self, request: SessionRequest) -> TeamResult<()> {
        if let SessionRequest::AwsIamUser(user) = &request {
            let app = &self.app_name;
            self.key_store
                .save_secret(app, &access_key_id_secret_name(&user.session_id), &user.access_key)
                .await?;
            self.key_store
                .save_secret(
                    app,
                    &secret_access_key_secret_name(&user.session_id),
                    &user.secret_key,
                )
                .await?;
        }
        let session = Session::from(request);
        self.store
            .update_workspace(&mut |ws| ws.upsert_session(session.clone()))?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> TeamResult<()> {
        let mut removed = None;
        self.store.update_workspace(&mut |ws| {
            removed = ws.session(session_id).map(|s| s.session_type());
            ws.remove_session(session_id);
        })?;
        if removed == Some(SessionType::AwsIamUser) {
            let app = &self.app_name;
            self.key_store
                .delete_secret(app, &access_key_id_secret_name(session_id))
                .await?;
            self.key_store
                .delete_secret(app, &secret_access_key_secret_name(session_id))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl IntegrationService for WorkspaceServices {
    async fn get_integration(&self, id: &str) -> TeamResult<Option<Integration>> {
        Ok(self.store.get_workspace()?.integration(id))
    }

    async fn create_integration(&self, request: IntegrationRequest, id: &str) -> TeamResult<()> {
        if self.store.get_workspace()?.integration(id).is_some() {
            return Err(TeamError::IntegrationSync {
                id: id.to_string(),
                reason: "an integration with this id already exists".to_string(),
            });
        }
        let integration = Integration::from_request(request, id);
        self.store
            .update_workspace(&mut |ws| ws.upsert_integration(integration.clone()))?;
        Ok(())
    }

    async fn delete_integration(&self, id: &str) -> TeamResult<()> {
        self.store.update_workspace(&mut |ws| {
            ws.remove_integration(id);
        })?;
        Ok(())
    }

    async fn logout(&self, id: &str) -> TeamResult<()> {
        debug!("integration {id} holds no device credentials");
        Ok(())
    }
}

impl SessionServiceFactory for WorkspaceServices {
    fn get_session_service(&self, _session_type: SessionType) -> Arc<dyn SessionService> {
        Arc::new(self.clone())
    }
}

impl IntegrationServiceFactory for WorkspaceServices {
    fn get_integration_service(
        &self,
        _integration_type: IntegrationType,
    ) -> Arc<dyn IntegrationService> {
        Arc::new(self.clone())
    }
}
