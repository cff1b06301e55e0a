//! Identity-provider integrations (AWS SSO portals, Azure tenants).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationType {
    AwsSso,
    Azure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsSsoIntegration {
    pub id: String,
    pub alias: String,
    pub portal_url: String,
    pub region: String,
    pub browser_opening: String,
    #[serde(default)]
    pub access_token_expiration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureIntegration {
    pub id: String,
    pub alias: String,
    pub tenant_id: String,
    pub region: String,
    #[serde(default)]
    pub is_online: bool,
}

/// An integration stored in the workspace. The `id` is the external
/// identifier shared with the team backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Integration {
    AwsSso(AwsSsoIntegration),
    Azure(AzureIntegration),
}

impl Integration {
    pub fn id(&self) -> &str {
        match self {
            Integration::AwsSso(i) => &i.id,
            Integration::Azure(i) => &i.id,
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            Integration::AwsSso(i) => &i.alias,
            Integration::Azure(i) => &i.alias,
        }
    }

    pub fn integration_type(&self) -> IntegrationType {
        match self {
            Integration::AwsSso(_) => IntegrationType::AwsSso,
            Integration::Azure(_) => IntegrationType::Azure,
        }
    }

    /// Builds the stored record for `request` under the external `id`.
    pub fn from_request(request: IntegrationRequest, id: impl Into<String>) -> Self {
        let id = id.into();
        match request {
            IntegrationRequest::AwsSso(r) => Integration::AwsSso(AwsSsoIntegration {
                id,
                alias: r.alias,
                portal_url: r.portal_url,
                region: r.region,
                browser_opening: r.browser_opening,
                access_token_expiration: None,
            }),
            IntegrationRequest::Azure(r) => Integration::Azure(AzureIntegration {
                id,
                alias: r.alias,
                tenant_id: r.tenant_id,
                region: r.region,
                is_online: false,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsSsoIntegrationRequest {
    pub alias: String,
    pub portal_url: String,
    pub region: String,
    pub browser_opening: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureIntegrationRequest {
    pub alias: String,
    pub tenant_id: String,
    pub region: String,
}

/// Payload handed to an integration service's `create_integration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IntegrationRequest {
    AwsSso(AwsSsoIntegrationRequest),
    Azure(AzureIntegrationRequest),
}

impl IntegrationRequest {
    pub fn integration_type(&self) -> IntegrationType {
        match self {
            IntegrationRequest::AwsSso(_) => IntegrationType::AwsSso,
            IntegrationRequest::Azure(_) => IntegrationType::Azure,
        }
    }
}
