use serde::{Deserialize, Serialize};
use std::fmt;

/// The team identity of the signed-in user.
///
/// Every field defaults to empty so that partially-populated keychain
/// records still deserialize. A soft-locked user keeps its identity
/// fields but has all key material and the access token blanked.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignedInUser {
    pub team_id: String,
    pub team_name: String,
    pub email: String,
    pub access_token: String,
    #[serde(rename = "publicRSAKey")]
    pub public_rsa_key: String,
    #[serde(rename = "privateRSAKey")]
    pub private_rsa_key: String,
    pub symmetric_key: String,
}

impl SignedInUser {
    /// Blanks key material and the access token, keeping the identity.
    pub fn lock(&mut self) {
        self.symmetric_key.clear();
        self.private_rsa_key.clear();
        self.public_rsa_key.clear();
        self.access_token.clear();
    }

    pub fn is_online(&self) -> bool {
        !self.access_token.is_empty()
    }
}

impl fmt::Debug for SignedInUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedInUser")
            .field("team_id", &self.team_id)
            .field("team_name", &self.team_name)
            .field("email", &self.email)
            .field("online", &self.is_online())
            .finish_non_exhaustive()
    }
}

/// Name and id of the workspace currently loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceIdentity {
    pub name: String,
    pub id: String,
}
