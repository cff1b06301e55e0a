use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    Info,
    Warning,
    Update,
}

/// An in-app notification persisted with the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub uuid: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            notification_type,
            title: title.into(),
            description: description.into(),
            link: None,
            read: false,
            created_at: Utc::now(),
        }
    }
}
