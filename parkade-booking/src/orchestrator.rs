use parkade_core::{PaymentGateway, PaymentMethod, PaymentStatus};
use std::sync::Arc;
use tracing::error;
use crate::BookingError;

pub struct PaymentOrchestrator {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentOrchestrator {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Charge a booking. Zero amounts still go through the gateway.
    pub async fn charge(&self, method: PaymentMethod, amount_cents: i64) -> Result<(), BookingError> {
        let status = self.gateway.authorize(method, amount_cents).await.map_err(|e| {
            error!("Payment gateway failed: {}", e);
            BookingError::PaymentGateway(e.to_string())
        })?;

        match status {
            PaymentStatus::Succeeded => Ok(()),
            PaymentStatus::Declined => Err(BookingError::PaymentDeclined(method.display_name().to_string())),
        }
    }
}
