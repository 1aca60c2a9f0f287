use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use crate::models::space::SpaceType;

/// A parking reservation with a validity window and a QR reference image.
///
/// Persisted with the camelCase field names of the stored ticket list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_spot: Option<String>,
    pub qr_code: String,
}

impl Ticket {
    /// A ticket is expired once `valid_to` is no longer in the future
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_to <= now
    }

    /// Time elapsed since the ticket became valid, zero before `valid_from`
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.valid_from).max(Duration::zero())
    }

    /// Cancellation is allowed while the elapsed time is within `window` (inclusive)
    pub fn is_cancellable(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.elapsed(now) <= window
    }

    /// Whole minutes of cancellation window left, rounded up. Zero once closed.
    pub fn cancellable_minutes_left(&self, now: DateTime<Utc>, window: Duration) -> i64 {
        if !self.is_cancellable(now, window) {
            return 0;
        }
        let remaining_ms = (window - self.elapsed(now)).num_milliseconds();
        (remaining_ms + 59_999) / 60_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ticket_at(valid_from: DateTime<Utc>, hours: i64) -> Ticket {
        Ticket {
            id: "abc123xyz".to_string(),
            space_type: SpaceType::Standard,
            valid_from,
            valid_to: valid_from + Duration::hours(hours),
            parking_spot: Some("S1".to_string()),
            qr_code: "https://example.test/qr?data=TICKET-1".to_string(),
        }
    }

    #[test]
    fn test_cancellation_boundary() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ticket = ticket_at(start, 2);
        let window = Duration::minutes(5);

        assert!(ticket.is_cancellable(start + Duration::minutes(5), window));
        assert!(!ticket.is_cancellable(start + Duration::seconds(301), window));
    }

    #[test]
    fn test_minutes_left_rounds_up() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ticket = ticket_at(start, 1);
        let window = Duration::minutes(5);

        assert_eq!(ticket.cancellable_minutes_left(start, window), 5);
        assert_eq!(ticket.cancellable_minutes_left(start + Duration::seconds(90), window), 4);
        assert_eq!(ticket.cancellable_minutes_left(start + Duration::minutes(6), window), 0);
    }

    #[test]
    fn test_clock_before_valid_from_keeps_full_window() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ticket = ticket_at(start, 1);
        let window = Duration::minutes(5);
        let early = start - Duration::minutes(30);

        assert_eq!(ticket.elapsed(early), Duration::zero());
        assert!(ticket.is_cancellable(early, window));
        assert_eq!(ticket.cancellable_minutes_left(early, window), 5);
    }

    #[test]
    fn test_expiry_is_inclusive_of_valid_to() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ticket = ticket_at(start, 3);

        assert!(!ticket.is_expired(start + Duration::hours(3) - Duration::seconds(1)));
        assert!(ticket.is_expired(start + Duration::hours(3)));
    }

    #[test]
    fn test_ticket_wire_format() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(ticket_at(start, 1)).unwrap();

        assert_eq!(json["type"], "standard");
        assert_eq!(json["parkingSpot"], "S1");
        assert!(json.get("validFrom").is_some());
        assert!(json.get("qrCode").is_some());
    }
}
