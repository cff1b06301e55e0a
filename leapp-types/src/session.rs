//! Local AWS sessions and the requests that create them.

use serde::{Deserialize, Serialize};

/// Discriminates the session variants a service factory can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    AwsIamUser,
    AwsIamRoleChained,
    AwsIamRoleFederated,
    AwsSsoRole,
}

/// Long-lived IAM user credentials. Access and secret keys live in the
/// keychain, never in the workspace document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamUserSession {
    pub session_id: String,
    pub session_name: String,
    pub region: String,
    pub profile_id: String,
    #[serde(default)]
    pub mfa_device: Option<String>,
}

/// A role assumed with another session's credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamRoleChainedSession {
    pub session_id: String,
    pub session_name: String,
    pub region: String,
    pub profile_id: String,
    pub role_arn: String,
    pub parent_session_id: String,
    #[serde(default)]
    pub role_session_name: Option<String>,
}

/// A role assumed through a SAML identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamRoleFederatedSession {
    pub session_id: String,
    pub session_name: String,
    pub region: String,
    pub profile_id: String,
    pub role_arn: String,
    /// Id of the merged [`crate::IdpUrl`] record.
    pub idp_url_id: String,
    pub idp_arn: String,
}

/// A role discovered by syncing an AWS SSO integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsSsoRoleSession {
    pub session_id: String,
    pub session_name: String,
    pub region: String,
    pub profile_id: String,
    pub role_arn: String,
    pub aws_sso_configuration_id: String,
}

/// A session stored in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Session {
    AwsIamUser(AwsIamUserSession),
    AwsIamRoleChained(AwsIamRoleChainedSession),
    AwsIamRoleFederated(AwsIamRoleFederatedSession),
    AwsSsoRole(AwsSsoRoleSession),
}

impl Session {
    pub fn session_type(&self) -> SessionType {
        match self {
            Session::AwsIamUser(_) => SessionType::AwsIamUser,
            Session::AwsIamRoleChained(_) => SessionType::AwsIamRoleChained,
            Session::AwsIamRoleFederated(_) => SessionType::AwsIamRoleFederated,
            Session::AwsSsoRole(_) => SessionType::AwsSsoRole,
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            Session::AwsIamUser(s) => &s.session_id,
            Session::AwsIamRoleChained(s) => &s.session_id,
            Session::AwsIamRoleFederated(s) => &s.session_id,
            Session::AwsSsoRole(s) => &s.session_id,
        }
    }

    pub fn session_name(&self) -> &str {
        match self {
            Session::AwsIamUser(s) => &s.session_name,
            Session::AwsIamRoleChained(s) => &s.session_name,
            Session::AwsIamRoleFederated(s) => &s.session_name,
            Session::AwsSsoRole(s) => &s.session_name,
        }
    }

    pub fn profile_id(&self) -> &str {
        match self {
            Session::AwsIamUser(s) => &s.profile_id,
            Session::AwsIamRoleChained(s) => &s.profile_id,
            Session::AwsIamRoleFederated(s) => &s.profile_id,
            Session::AwsSsoRole(s) => &s.profile_id,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            Session::AwsIamUser(s) => &s.region,
            Session::AwsIamRoleChained(s) => &s.region,
            Session::AwsIamRoleFederated(s) => &s.region,
            Session::AwsSsoRole(s) => &s.region,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamUserSessionRequest {
    pub session_name: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub mfa_device: Option<String>,
    pub profile_id: String,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamRoleChainedSessionRequest {
    pub session_name: String,
    pub region: String,
    pub role_arn: String,
    pub profile_id: String,
    pub parent_session_id: String,
    pub role_session_name: Option<String>,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIamRoleFederatedSessionRequest {
    pub session_name: String,
    pub region: String,
    pub role_arn: String,
    pub profile_id: String,
    pub idp_url: String,
    pub idp_arn: String,
    pub session_id: String,
}

/// Payload handed to a session service's `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionRequest {
    AwsIamUser(AwsIamUserSessionRequest),
    AwsIamRoleChained(AwsIamRoleChainedSessionRequest),
    AwsIamRoleFederated(AwsIamRoleFederatedSessionRequest),
}

impl SessionRequest {
    pub fn session_type(&self) -> SessionType {
        match self {
            SessionRequest::AwsIamUser(_) => SessionType::AwsIamUser,
            SessionRequest::AwsIamRoleChained(_) => SessionType::AwsIamRoleChained,
            SessionRequest::AwsIamRoleFederated(_) => SessionType::AwsIamRoleFederated,
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            SessionRequest::AwsIamUser(r) => &r.session_id,
            SessionRequest::AwsIamRoleChained(r) => &r.session_id,
            SessionRequest::AwsIamRoleFederated(r) => &r.session_id,
        }
    }
}

/// Builds the workspace record for a request. Credentials carried by
/// IAM user requests are dropped; they belong in the keychain.
impl From<SessionRequest> for Session {
    fn from(request: SessionRequest) -> Self {
        match request {
            SessionRequest::AwsIamUser(r) => Session::AwsIamUser(AwsIamUserSession {
                session_id: r.session_id,
                session_name: r.session_name,
                region: r.region,
                profile_id: r.profile_id,
                mfa_device: r.mfa_device,
            }),
            SessionRequest::AwsIamRoleChained(r) => {
                Session::AwsIamRoleChained(AwsIamRoleChainedSession {
                    session_id: r.session_id,
                    session_name: r.session_name,
                    region: r.region,
                    profile_id: r.profile_id,
                    role_arn: r.role_arn,
                    parent_session_id: r.parent_session_id,
                    role_session_name: r.role_session_name,
                })
            }
            SessionRequest::AwsIamRoleFederated(r) => {
                Session::AwsIamRoleFederated(AwsIamRoleFederatedSession {
                    session_id: r.session_id,
                    session_name: r.session_name,
                    region: r.region,
                    profile_id: r.profile_id,
                    role_arn: r.role_arn,
                    idp_url_id: r.idp_url,
                    idp_arn: r.idp_arn,
                })
            }
        }
    }
}
