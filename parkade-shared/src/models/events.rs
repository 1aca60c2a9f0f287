use crate::models::notification::Notification;

/// Published whenever a notification is appended to a profile's store
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct NotificationPostedEvent {
    pub profile_id: String,
    pub notification: Notification,
}
