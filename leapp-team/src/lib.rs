//! Team workspace synchronization for Leapp.
//!
//! A device either works in its local workspace or mirrors a team's
//! workspace from the team backend. This crate owns the transitions
//! between the two and the reconciliation of remote secrets into local
//! sessions and integrations.
//!
//! # Architecture
//!
//! 1. **Authentication** (`auth`): the signed-in user, its keychain record,
//!    token expiry, and sign-in/sign-out.
//!
//! 2. **Key scoping** (`keys`): which lock file and which key material apply
//!    to the local or a team context.
//!
//! 3. **Switching** (`switcher`): the workspace pointer, loading the right
//!    document, and publishing identity changes. Transitions are serialized;
//!    a second one started while the first runs fails with
//!    [`TeamError::TransitionInProgress`].
//!
//! 4. **Reconciliation** (`reconciler`, `resolver`): replaces the team
//!    document with the remote secret list, resolving chained sessions to
//!    their parents.
//!
//! Everything outside the crate is reached through the traits in
//! [`services`], bundled in [`TeamDependencies`].

mod auth;
mod config;
mod coordinator;
mod error;
mod jwt;
mod keys;
mod reconciler;
mod repository;
mod resolver;
pub mod services;
mod state;
mod switcher;

pub use auth::NOT_LOGGED_IN;
pub use config::TeamConfig;
pub use coordinator::TeamCoordinator;
pub use error::{LogLevel, TeamError, TeamResult};
pub use jwt::{is_jwt_token_expired, is_jwt_token_expired_at};
pub use reconciler::is_orphaned_chained_session;
pub use repository::{
    PemKeyImporter, WorkspaceIdpUrls, WorkspaceProfiles, WorkspaceServices,
    WorkspaceSessionRepository, access_key_id_secret_name, secret_access_key_secret_name,
};
pub use resolver::{MULTIPLE_SSO_ROLES, NO_SSO_ROLE};
pub use services::TeamDependencies;
pub use state::{RepositoryEvent, TeamState};
pub use switcher::WorkspacePointer;
