use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An AWS named profile. Names are unique within a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedProfile {
    pub id: String,
    pub name: String,
}

impl NamedProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// A SAML identity-provider URL referenced by federated sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpUrl {
    pub id: String,
    pub url: String,
}

impl IdpUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
        }
    }
}
