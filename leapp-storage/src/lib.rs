//! Keychain and encrypted workspace storage for Leapp.
//!
//! # Architecture
//!
//! - [`KeyMaterialStore`]: secure key/value storage scoped by application
//!   name. Backed by the OS keychain in production and by an in-memory map
//!   in tests and headless runs.
//! - [`WorkspaceStore`]: the single mutable workspace document of the
//!   process. [`FileWorkspaceStore`] keeps it in memory and persists every
//!   mutation to an encrypted lock file; which file and which key are
//!   chosen by the caller when switching context.
//! - [`NotificationService`]: read/unread bookkeeping for notifications
//!   stored in the workspace.

mod error;
mod key_material;
mod notifications;
mod workspace_store;

pub use error::{StorageError, StorageResult};
pub use key_material::{InMemoryKeyStore, KeyMaterialStore, KeyringStore};
pub use notifications::NotificationService;
pub use workspace_store::{FileWorkspaceStore, WorkspaceStore};
