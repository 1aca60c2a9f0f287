//! Notification texts for user actions.

use chrono::{DateTime, Utc};
use parkade_shared::{Notification, NotificationKind, SpaceType};

pub fn space_booked(space_type: SpaceType, space_id: &str, hours: u32, now: DateTime<Utc>) -> Notification {
    let plural = if hours > 1 { "s" } else { "" };
    Notification::new(
        "Parking Space Booked",
        format!("Successfully booked {} parking space {} for {} hour{}.", space_type, space_id, hours, plural),
        NotificationKind::Success,
        now,
    )
}

pub fn ticket_cancelled(parking_spot: Option<&str>, now: DateTime<Utc>) -> Notification {
    Notification::new(
        "Ticket Cancelled",
        format!(
            "Your parking ticket for space {} has been cancelled and refunded.",
            parking_spot.unwrap_or("-")
        ),
        NotificationKind::Info,
        now,
    )
}

pub fn premium_welcome(now: DateTime<Utc>) -> Notification {
    Notification::new(
        "Welcome to Premium!",
        "Your premium membership is now active. Enjoy unlimited parking!".to_string(),
        NotificationKind::Success,
        now,
    )
}

pub fn premium_cancelled(now: DateTime<Utc>) -> Notification {
    Notification::new(
        "Premium Membership Cancelled",
        "Your premium membership has been cancelled. We hope to see you again!".to_string(),
        NotificationKind::Info,
        now,
    )
}
