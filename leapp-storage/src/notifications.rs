use crate::error::StorageResult;
use crate::workspace_store::WorkspaceStore;
use leapp_types::Notification;
use std::sync::Arc;

/// Read/unread bookkeeping for notifications stored in the workspace.
pub struct NotificationService {
    store: Arc<dyn WorkspaceStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn WorkspaceStore>) -> Self {
        Self { store }
    }

    /// All notifications, or only unread ones when `unread_only` is set.
    pub fn get_notifications(&self, unread_only: bool) -> StorageResult<Vec<Notification>> {
        let notifications = self.store.get_workspace()?.notifications;
        if unread_only {
            return Ok(notifications.into_iter().filter(|n| !n.read).collect());
        }
        Ok(notifications)
    }

    /// Marks the notification with `uuid` as read. Unknown ids are ignored.
    pub fn set_notification_as_read(&self, uuid: &str) -> StorageResult<()> {
        self.store.update_workspace(&mut |workspace| {
            for notification in workspace.notifications.iter_mut() {
                if notification.uuid == uuid {
                    notification.read = true;
                }
            }
        })
    }

    pub fn add_notification(&self, notification: Notification) -> StorageResult<()> {
        self.store
            .update_workspace(&mut |workspace| workspace.notifications.push(notification.clone()))
    }
}
