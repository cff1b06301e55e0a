//! Parent resolution for chained sessions.

use crate::coordinator::TeamCoordinator;
use crate::error::{TeamError, TeamResult};
use leapp_types::{AwsIamRoleChainedSessionSecret, IntegrationType};
use tracing::error;

pub const NO_SSO_ROLE: &str = "Cannot find a proper SSO role from SSO integrations";
pub const MULTIPLE_SSO_ROLES: &str = "Multiple SSO roles found in SSO integrations";

fn resolution_failed(message: &str) -> TeamError {
    error!("{message}");
    TeamError::Resolution(message.to_string())
}

impl TeamCoordinator {
    /// The session a chained secret assumes from.
    ///
    /// A direct `assumerSessionId` wins. Otherwise the assumer integration's
    /// roles are refreshed and exactly one SSO role with the expected ARN
    /// must exist under it.
    pub async fn get_assumer_session_id(
        &self,
        secret: &AwsIamRoleChainedSessionSecret,
    ) -> TeamResult<String> {
        if let Some(session_id) = &secret.assumer_session_id {
            return Ok(session_id.clone());
        }
        let Some(integration_id) = secret.assumer_integration_id.as_deref() else {
            return Err(resolution_failed(NO_SSO_ROLE));
        };

        self.deps
            .integration_factory
            .get_integration_service(IntegrationType::AwsSso)
            .sync_sessions(integration_id)
            .await?;

        let role_arn = format!(
            "arn:aws:iam::{}/{}",
            secret.assumer_account_id.as_deref().unwrap_or_default(),
            secret.assumer_role_name.as_deref().unwrap_or_default()
        );
        let candidates: Vec<_> = self
            .deps
            .session_repository
            .get_aws_sso_roles()?
            .into_iter()
            .filter(|role| {
                role.aws_sso_configuration_id == integration_id && role.role_arn == role_arn
            })
            .collect();

        match candidates.as_slice() {
            [role] => Ok(role.session_id.clone()),
            [] => Err(resolution_failed(NO_SSO_ROLE)),
            _ => Err(resolution_failed(MULTIPLE_SSO_ROLES)),
        }
    }
}
