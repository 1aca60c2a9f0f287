use chrono::{DateTime, Utc};
use parkade_catalog::BookingDuration;
use parkade_shared::{SpaceType, Ticket};
use rand::Rng;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 9;

/// Generates ticket records with their QR reference
#[derive(Debug, Clone)]
pub struct TicketIssuer {
    qr_endpoint: String,
}

impl TicketIssuer {
    pub fn new(qr_endpoint: &str) -> Self {
        Self {
            qr_endpoint: qr_endpoint.to_string(),
        }
    }

    /// Ticket valid from `now` for `duration`
    pub fn issue(
        &self,
        space_type: SpaceType,
        parking_spot: &str,
        duration: BookingDuration,
        now: DateTime<Utc>,
    ) -> Ticket {
        Ticket {
            id: random_token(),
            space_type,
            valid_from: now,
            valid_to: now + duration.as_chrono(),
            parking_spot: Some(parking_spot.to_string()),
            qr_code: self.qr_url(&random_token()),
        }
    }

    /// URL of the QR image encoding `TICKET-{token}`. Never fetched here.
    pub fn qr_url(&self, token: &str) -> String {
        format!("{}TICKET-{}", self.qr_endpoint, token)
    }
}

/// Short lowercase base-36 token; not suitable as a credential
pub fn random_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
