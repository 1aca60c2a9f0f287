use parkade_core::ProfileId;
use parkade_shared::Notification;
use parkade_store::ProfileRepository;
use serde::Serialize;
use tracing::debug;

use crate::BookingError;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

impl NotificationFeed {
    fn new(notifications: Vec<Notification>) -> Self {
        let unread_count = notifications.iter().filter(|n| !n.read).count();
        Self { notifications, unread_count }
    }
}

pub struct NotificationService {
    repo: ProfileRepository,
}

impl NotificationService {
    pub fn new(repo: ProfileRepository) -> Self {
        Self { repo }
    }

    /// Read-only listing used for the unread badge
    pub async fn list(&self, profile: &ProfileId) -> Result<NotificationFeed, BookingError> {
        Ok(NotificationFeed::new(self.repo.notifications(profile).await?))
    }

    /// Open the panel: return the entries as they were and persist them all as read
    pub async fn open_panel(&self, profile: &ProfileId) -> Result<NotificationFeed, BookingError> {
        let _guard = self.repo.lock().await;

        let loaded = self.repo.notifications(profile).await?;
        let feed = NotificationFeed::new(loaded.clone());

        if feed.unread_count > 0 {
            let mut read = loaded;
            read.iter_mut().for_each(Notification::mark_read);

            let mut uow = self.repo.begin();
            uow.put_notifications(profile, &read)?;
            uow.commit().await?;
            debug!("Marked {} notifications read for {}", feed.unread_count, profile);
        }

        Ok(feed)
    }
}
