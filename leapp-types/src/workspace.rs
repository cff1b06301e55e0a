use crate::{
    AwsSsoIntegration, AwsSsoRoleSession, AzureIntegration, IdpUrl, Integration, NamedProfile,
    Notification, Session,
};
use serde::{Deserialize, Serialize};

/// Device preferences that survive switching between local and team
/// workspaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub color_theme: String,
    pub credential_method: String,
    pub default_region: String,
    pub default_location: String,
    pub saml_role_session_duration: u32,
    pub ssm_region_behaviour: String,
    pub extension_enabled: bool,
    pub require_password: bool,
    pub touch_id_enabled: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            color_theme: "system-default".to_string(),
            credential_method: "credential-file".to_string(),
            default_region: "us-east-1".to_string(),
            default_location: "eastus".to_string(),
            saml_role_session_duration: 3600,
            ssm_region_behaviour: "no".to_string(),
            extension_enabled: false,
            require_password: false,
            touch_id_enabled: false,
        }
    }
}

/// The local document holding sessions, integrations, profiles, and
/// settings for either the local or a team context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workspace {
    pub sessions: Vec<Session>,
    pub aws_sso_integrations: Vec<AwsSsoIntegration>,
    pub azure_integrations: Vec<AzureIntegration>,
    pub profiles: Vec<NamedProfile>,
    pub idp_urls: Vec<IdpUrl>,
    pub settings: GlobalSettings,
    pub notifications: Vec<Notification>,
}

impl Workspace {
    /// All integrations, AWS SSO first.
    pub fn integrations(&self) -> Vec<Integration> {
        self.aws_sso_integrations
            .iter()
            .cloned()
            .map(Integration::AwsSso)
            .chain(self.azure_integrations.iter().cloned().map(Integration::Azure))
            .collect()
    }

    pub fn integration(&self, id: &str) -> Option<Integration> {
        self.integrations().into_iter().find(|i| i.id() == id)
    }

    /// Inserts `integration`, replacing any record with the same id.
    pub fn upsert_integration(&mut self, integration: Integration) {
        self.remove_integration(integration.id());
        match integration {
            Integration::AwsSso(i) => self.aws_sso_integrations.push(i),
            Integration::Azure(i) => self.azure_integrations.push(i),
        }
    }

    pub fn remove_integration(&mut self, id: &str) -> bool {
        let before = self.aws_sso_integrations.len() + self.azure_integrations.len();
        self.aws_sso_integrations.retain(|i| i.id != id);
        self.azure_integrations.retain(|i| i.id != id);
        before != self.aws_sso_integrations.len() + self.azure_integrations.len()
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.session_id() == session_id)
    }

    /// Inserts `session`, replacing any record with the same id.
    pub fn upsert_session(&mut self, session: Session) {
        self.remove_session(session.session_id());
        self.sessions.push(session);
    }

    pub fn remove_session(&mut self, session_id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.session_id() != session_id);
        before != self.sessions.len()
    }

    pub fn aws_sso_roles(&self) -> Vec<AwsSsoRoleSession> {
        self.sessions
            .iter()
            .filter_map(|s| match s {
                Session::AwsSsoRole(role) => Some(role.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn profile_by_name(&self, name: &str) -> Option<&NamedProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn idp_url_by_url(&self, url: &str) -> Option<&IdpUrl> {
        self.idp_urls.iter().find(|u| u.url == url)
    }
}
