//! Collaborators the team coordinator is built from.
//!
//! Each seam is a narrow trait so the coordinator can run against the real
//! cloud services in the app and against recording fakes in tests.

use crate::error::TeamResult;
use async_trait::async_trait;
use leapp_crypto::{RsaKeyMaterial, RsaKeyPair};
use leapp_storage::{KeyMaterialStore, WorkspaceStore};
use leapp_types::{
    AwsSsoRoleSession, IdpUrl, Integration, IntegrationRequest, IntegrationType,
    LocalSecretDto, NamedProfile, Session, SessionRequest, SessionType, SignedInUser,
};
use std::sync::Arc;

/// Creates and deletes sessions of one type, including any cloud-side
/// bookkeeping that goes with them.
#[async_trait]
pub trait SessionService: Send + Sync {
    async fn create(&self, request: SessionRequest) -> TeamResult<()>;

    async fn delete(&self, session_id: &str) -> TeamResult<()>;
}

pub trait SessionServiceFactory: Send + Sync {
    fn get_session_service(&self, session_type: SessionType) -> Arc<dyn SessionService>;
}

/// Manages integrations of one type.
#[async_trait]
pub trait IntegrationService: Send + Sync {
    async fn get_integration(&self, id: &str) -> TeamResult<Option<Integration>>;

    /// Creates an integration under the externally supplied `id`.
    async fn create_integration(&self, request: IntegrationRequest, id: &str) -> TeamResult<()>;

    async fn delete_integration(&self, id: &str) -> TeamResult<()>;

    /// Revokes any credentials the integration holds on this device.
    async fn logout(&self, id: &str) -> TeamResult<()>;

    /// Refreshes the roles derived from the integration. Only SSO
    /// integrations derive roles.
    async fn sync_sessions(&self, _id: &str) -> TeamResult<()> {
        Ok(())
    }
}

pub trait IntegrationServiceFactory: Send + Sync {
    fn get_integration_service(
        &self,
        integration_type: IntegrationType,
    ) -> Arc<dyn IntegrationService>;
}

/// Read access to sessions in the active workspace.
pub trait SessionRepository: Send + Sync {
    fn get_session_by_id(&self, session_id: &str) -> TeamResult<Option<Session>>;

    fn get_aws_sso_roles(&self) -> TeamResult<Vec<AwsSsoRoleSession>>;
}

pub trait NamedProfileService: Send + Sync {
    /// Returns the profile called `name`, creating it on first use.
    fn merge_profile_name(&self, name: &str) -> TeamResult<NamedProfile>;
}

pub trait IdpUrlService: Send + Sync {
    /// Returns the record for `url`, creating it on first use.
    fn merge_idp_url(&self, url: &str) -> TeamResult<IdpUrl>;
}

/// Authenticates against the team backend.
#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> TeamResult<SignedInUser>;
}

/// Fetches the team's secrets, decrypting them with the user's keys.
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    async fn get_secrets(&self, keys: &RsaKeyPair) -> TeamResult<Vec<LocalSecretDto>>;
}

pub trait KeyImporter: Send + Sync {
    fn import_rsa_keys(&self, material: RsaKeyMaterial<'_>) -> TeamResult<RsaKeyPair>;
}

/// Everything a [`crate::TeamCoordinator`] needs from the outside.
#[derive(Clone)]
pub struct TeamDependencies {
    pub key_store: Arc<dyn KeyMaterialStore>,
    pub workspace_store: Arc<dyn WorkspaceStore>,
    pub session_factory: Arc<dyn SessionServiceFactory>,
    pub integration_factory: Arc<dyn IntegrationServiceFactory>,
    pub session_repository: Arc<dyn SessionRepository>,
    pub named_profiles: Arc<dyn NamedProfileService>,
    pub idp_urls: Arc<dyn IdpUrlService>,
    pub user_provider: Arc<dyn UserProvider>,
    pub secrets_provider: Arc<dyn SecretsProvider>,
    pub key_importer: Arc<dyn KeyImporter>,
    /// Stable device identifier; key material of the local workspace.
    pub machine_id: String,
}
