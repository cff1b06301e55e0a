//! Remote secret records as delivered by the team backend.
//!
//! A `LocalSecretDto` is received fresh on every sync and translated into
//! local sessions and integrations; it is never persisted verbatim.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsSsoIntegrationSecret {
    pub id: String,
    pub alias: String,
    pub portal_url: String,
    pub region: String,
    pub browser_opening: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureIntegrationSecret {
    pub id: String,
    pub alias: String,
    pub tenant_id: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamUserSessionSecret {
    pub session_id: String,
    pub profile_name: String,
    pub session_name: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    #[serde(default)]
    pub mfa_device: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamRoleChainedSessionSecret {
    pub session_id: String,
    pub session_name: String,
    pub region: String,
    pub role_arn: String,
    pub profile_name: String,
    #[serde(default)]
    pub parent_session_id: Option<String>,
    #[serde(default)]
    pub assumer_session_id: Option<String>,
    #[serde(default)]
    pub assumer_integration_id: Option<String>,
    #[serde(default)]
    pub assumer_account_id: Option<String>,
    #[serde(default)]
    pub assumer_role_name: Option<String>,
    #[serde(default)]
    pub role_session_name: Option<String>,
}

impl AwsIamRoleChainedSessionSecret {
    /// True when the record names neither a parent session nor an SSO
    /// integration to resolve one from.
    pub fn is_orphaned(&self) -> bool {
        self.assumer_session_id.is_none() && self.assumer_integration_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamRoleFederatedSessionSecret {
    pub session_id: String,
    pub session_name: String,
    pub region: String,
    pub role_arn: String,
    pub saml_url: String,
    pub idp_arn: String,
    pub profile_name: String,
}

/// A remote secret, discriminated by `secretType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "secretType", rename_all = "camelCase")]
pub enum LocalSecretDto {
    AwsSsoIntegration(AwsSsoIntegrationSecret),
    AzureIntegration(AzureIntegrationSecret),
    AwsIamUserSession(AwsIamUserSessionSecret),
    AwsIamRoleChainedSession(AwsIamRoleChainedSessionSecret),
    AwsIamRoleFederatedSession(AwsIamRoleFederatedSessionSecret),
}

/// Borrowed view of an integration secret.
#[derive(Debug, Clone, Copy)]
pub enum IntegrationSecret<'a> {
    AwsSso(&'a AwsSsoIntegrationSecret),
    Azure(&'a AzureIntegrationSecret),
}

impl IntegrationSecret<'_> {
    pub fn id(&self) -> &str {
        match self {
            IntegrationSecret::AwsSso(s) => &s.id,
            IntegrationSecret::Azure(s) => &s.id,
        }
    }
}

/// Borrowed view of a session secret.
#[derive(Debug, Clone, Copy)]
pub enum SessionSecret<'a> {
    AwsIamUser(&'a AwsIamUserSessionSecret),
    AwsIamRoleChained(&'a AwsIamRoleChainedSessionSecret),
    AwsIamRoleFederated(&'a AwsIamRoleFederatedSessionSecret),
}

impl SessionSecret<'_> {
    pub fn session_id(&self) -> &str {
        match self {
            SessionSecret::AwsIamUser(s) => &s.session_id,
            SessionSecret::AwsIamRoleChained(s) => &s.session_id,
            SessionSecret::AwsIamRoleFederated(s) => &s.session_id,
        }
    }
}

/// Which reconciliation path a secret takes.
#[derive(Debug, Clone, Copy)]
pub enum SecretKind<'a> {
    Integration(IntegrationSecret<'a>),
    Session(SessionSecret<'a>),
}

impl LocalSecretDto {
    pub fn kind(&self) -> SecretKind<'_> {
        match self {
            LocalSecretDto::AwsSsoIntegration(s) => {
                SecretKind::Integration(IntegrationSecret::AwsSso(s))
            }
            LocalSecretDto::AzureIntegration(s) => {
                SecretKind::Integration(IntegrationSecret::Azure(s))
            }
            LocalSecretDto::AwsIamUserSession(s) => SecretKind::Session(SessionSecret::AwsIamUser(s)),
            LocalSecretDto::AwsIamRoleChainedSession(s) => {
                SecretKind::Session(SessionSecret::AwsIamRoleChained(s))
            }
            LocalSecretDto::AwsIamRoleFederatedSession(s) => {
                SecretKind::Session(SessionSecret::AwsIamRoleFederated(s))
            }
        }
    }
}
