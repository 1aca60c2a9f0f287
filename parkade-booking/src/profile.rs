use chrono::{DateTime, Utc};
use parkade_core::ProfileId;
use parkade_shared::Notification;
use serde::Serialize;

use crate::{BookingError, ParkingServices, TicketView};

/// Everything persisted for one profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub id: ProfileId,
    pub is_premium_member: bool,
    pub premium_valid_until: Option<DateTime<Utc>>,
    pub tickets: Vec<TicketView>,
    pub notifications: Vec<Notification>,
}

impl ProfileSnapshot {
    pub async fn load(
        services: &ParkingServices,
        profile: &ProfileId,
        now: DateTime<Utc>,
    ) -> Result<Self, BookingError> {
        let membership = services.membership.status(profile).await?;
        let tickets = services.tickets.active_tickets(profile, now).await?;
        let feed = services.notifications.list(profile).await?;

        Ok(Self {
            id: profile.clone(),
            is_premium_member: membership.is_premium_member,
            premium_valid_until: membership.valid_until,
            tickets,
            notifications: feed.notifications,
        })
    }
}
