use chrono::{DateTime, Utc};
use parkade_catalog::{PricingEngine, Quote};
use parkade_core::{PaymentMethod, ProfileId};
use parkade_shared::{Notification, SpaceType, Ticket};
use parkade_store::ProfileRepository;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{CatalogService, SpaceListing};
use crate::fulfillment::TicketIssuer;
use crate::orchestrator::PaymentOrchestrator;
use crate::{notices, BookingError, NextView};

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub duration_hours: u32,
    pub space_id: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub ticket: Ticket,
    pub quote: Quote,
    pub notification: Notification,
    pub next_view: NextView,
}

/// Quotes and books parking spaces
pub struct BookingService {
    repo: ProfileRepository,
    catalog: CatalogService,
    pricing: PricingEngine,
    issuer: TicketIssuer,
    payments: PaymentOrchestrator,
}

impl BookingService {
    pub fn new(
        repo: ProfileRepository,
        catalog: CatalogService,
        pricing: PricingEngine,
        issuer: TicketIssuer,
        payments: PaymentOrchestrator,
    ) -> Self {
        Self { repo, catalog, pricing, issuer, payments }
    }

    pub async fn available_spaces(&self, space_type: SpaceType) -> Result<SpaceListing, BookingError> {
        Ok(self.catalog.listing(space_type).await?)
    }

    /// Price for the profile's current membership state
    pub async fn quote(
        &self,
        profile: &ProfileId,
        space_type: SpaceType,
        duration_hours: u32,
    ) -> Result<Quote, BookingError> {
        let duration = self.pricing.duration(duration_hours)?;
        let membership = self.repo.membership(profile).await?;
        Ok(self.pricing.quote(space_type, duration, membership.is_premium_member))
    }

    /// Charge, issue a ticket and take the space.
    ///
    /// The ticket, the catalog update, the notification and the profile index
    /// are written in a single commit.
    pub async fn book(
        &self,
        profile: &ProfileId,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation, BookingError> {
        let duration = self.pricing.duration(request.duration_hours)?;

        let _guard = self.repo.lock().await;

        let mut inventory = self.catalog.inventory().await?;
        let actual = inventory
            .get(&request.space_id)
            .map(|s| s.space_type)
            .ok_or_else(|| parkade_catalog::InventoryError::NotFound(request.space_id.clone()))?;

        if actual != request.space_type {
            return Err(BookingError::SpaceTypeMismatch {
                space_id: request.space_id,
                requested: request.space_type,
                actual,
            });
        }

        if let Err(e) = inventory.occupy(&request.space_id) {
            warn!("Booking rejected for {}: {}", profile, e);
            return Err(e.into());
        }

        let membership = self.repo.membership(profile).await?;
        let quote = self.pricing.quote(request.space_type, duration, membership.is_premium_member);

        self.payments.charge(request.payment_method, quote.total_cents).await?;

        let ticket = self.issuer.issue(request.space_type, &request.space_id, duration, now);
        let notification = notices::space_booked(request.space_type, &request.space_id, duration.hours(), now);

        let mut tickets = self.repo.tickets(profile).await?;
        tickets.push(ticket.clone());

        let mut notifications = self.repo.notifications(profile).await?;
        notifications.push(notification.clone());

        let mut profiles = self.repo.profiles().await?;
        if !profiles.contains(profile) {
            profiles.push(profile.clone());
        }

        let mut uow = self.repo.begin();
        uow.put_tickets(profile, &tickets)?;
        uow.put_spaces(inventory.spaces())?;
        uow.put_notifications(profile, &notifications)?;
        uow.put_profiles(&profiles)?;
        uow.commit().await?;

        info!(
            "Ticket {} issued to {}: {} space {} for {}h ({})",
            ticket.id, profile, request.space_type, request.space_id, duration.hours(), quote.display
        );

        Ok(BookingConfirmation {
            ticket,
            quote,
            notification,
            next_view: NextView::Tickets,
        })
    }
}
