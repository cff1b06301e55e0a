//! Observable team state.
//!
//! Each stream has one sender, owned here and only written from inside
//! the crate. Consumers hold receivers.

use leapp_types::{SignedInUser, WorkspaceIdentity};
use tokio::sync::{broadcast, watch};

/// Signals for consumers caching workspace content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryEvent {
    /// Sessions and integrations must be re-read from the workspace store.
    SessionsAndIntegrationsReloaded,
}

const EVENT_CAPACITY: usize = 16;

pub struct TeamState {
    signed_in_user: watch::Sender<Option<SignedInUser>>,
    workspace: watch::Sender<Option<WorkspaceIdentity>>,
    switching_workspace: watch::Sender<bool>,
    events: broadcast::Sender<RepositoryEvent>,
}

impl Default for TeamState {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            signed_in_user: watch::Sender::new(None),
            workspace: watch::Sender::new(None),
            switching_workspace: watch::Sender::new(false),
            events,
        }
    }

    pub fn subscribe_signed_in_user(&self) -> watch::Receiver<Option<SignedInUser>> {
        self.signed_in_user.subscribe()
    }

    pub fn subscribe_workspace(&self) -> watch::Receiver<Option<WorkspaceIdentity>> {
        self.workspace.subscribe()
    }

    /// True while a destructive workspace transition runs. Readers of the
    /// workspace store should hold off until it drops back to false.
    pub fn subscribe_switching_workspace(&self) -> watch::Receiver<bool> {
        self.switching_workspace.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RepositoryEvent> {
        self.events.subscribe()
    }

    pub fn signed_in_user(&self) -> Option<SignedInUser> {
        self.signed_in_user.borrow().clone()
    }

    pub fn workspace(&self) -> Option<WorkspaceIdentity> {
        self.workspace.borrow().clone()
    }

    pub fn is_switching_workspace(&self) -> bool {
        *self.switching_workspace.borrow()
    }

    pub(crate) fn publish_signed_in_user(&self, user: Option<SignedInUser>) {
        self.signed_in_user.send_replace(user);
    }

    pub(crate) fn publish_workspace(&self, identity: WorkspaceIdentity) {
        self.workspace.send_replace(Some(identity));
    }

    pub(crate) fn notify_reload(&self) {
        // No subscribers is fine.
        let _ = self.events.send(RepositoryEvent::SessionsAndIntegrationsReloaded);
    }

    /// Raises the switching flag until the returned guard drops.
    pub(crate) fn begin_switch(&self) -> SwitchGuard<'_> {
        self.switching_workspace.send_replace(true);
        SwitchGuard {
            flag: &self.switching_workspace,
        }
    }
}

pub(crate) struct SwitchGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl Drop for SwitchGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}
