//! Core data model for Leapp team workspaces.
//!
//! Plain serde types shared by every other crate:
//! - Sessions and integrations as closed sum types
//! - The workspace document and its global settings
//! - The signed-in team user and workspace identity
//! - Remote secret records (`LocalSecretDto`) as delivered by the team backend

mod integration;
mod notification;
mod profile;
mod secret;
mod session;
mod user;
mod workspace;

pub use integration::{
    AwsSsoIntegration, AwsSsoIntegrationRequest, AzureIntegration, AzureIntegrationRequest,
    Integration, IntegrationRequest, IntegrationType,
};
pub use notification::{Notification, NotificationType};
pub use profile::{IdpUrl, NamedProfile};
pub use secret::{
    AwsIamRoleChainedSessionSecret, AwsIamRoleFederatedSessionSecret, AwsIamUserSessionSecret,
    AwsSsoIntegrationSecret, AzureIntegrationSecret, IntegrationSecret, LocalSecretDto,
    SecretKind, SessionSecret,
};
pub use session::{
    AwsIamRoleChainedSession, AwsIamRoleChainedSessionRequest, AwsIamRoleFederatedSession,
    AwsIamRoleFederatedSessionRequest, AwsIamUserSession, AwsIamUserSessionRequest,
    AwsSsoRoleSession, Session, SessionRequest, SessionType,
};
pub use user::{SignedInUser, WorkspaceIdentity};
pub use workspace::{GlobalSettings, Workspace};
