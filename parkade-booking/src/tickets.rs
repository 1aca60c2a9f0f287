use chrono::{DateTime, Duration, Utc};
use parkade_core::ProfileId;
use parkade_shared::{Notification, Ticket};
use parkade_store::ProfileRepository;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::CatalogService;
use crate::{notices, BookingError};

/// A ticket as listed on the tickets view
#[derive(Debug, Clone, Serialize)]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub cancellable: bool,
    pub cancellable_minutes_left: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancellationOutcome {
    pub ticket: Ticket,
    /// False when the ticket's space is not in the catalog
    pub space_restored: bool,
    pub notification: Notification,
}

/// Lists, cancels and expires tickets
pub struct TicketService {
    repo: ProfileRepository,
    catalog: CatalogService,
    cancellation_window: Duration,
}

impl TicketService {
    pub fn new(repo: ProfileRepository, catalog: CatalogService, cancellation_window: Duration) -> Self {
        Self { repo, catalog, cancellation_window }
    }

    /// Tickets still valid at `now`, in purchase order
    pub async fn active_tickets(&self, profile: &ProfileId, now: DateTime<Utc>) -> Result<Vec<TicketView>, BookingError> {
        let tickets = self.repo.tickets(profile).await?;
        Ok(tickets
            .into_iter()
            .filter(|t| !t.is_expired(now))
            .map(|ticket| TicketView {
                cancellable: ticket.is_cancellable(now, self.cancellation_window),
                cancellable_minutes_left: ticket.cancellable_minutes_left(now, self.cancellation_window),
                ticket,
            })
            .collect())
    }

    /// Cancel within the window, returning the space to the catalog
    pub async fn cancel(
        &self,
        profile: &ProfileId,
        ticket_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CancellationOutcome, BookingError> {
        let _guard = self.repo.lock().await;

        let mut tickets = self.repo.tickets(profile).await?;
        let position = tickets
            .iter()
            .position(|t| t.id == ticket_id)
            .ok_or_else(|| BookingError::TicketNotFound(ticket_id.to_string()))?;

        if !tickets[position].is_cancellable(now, self.cancellation_window) {
            warn!("Cancellation of ticket {} refused for {}: window closed", ticket_id, profile);
            return Err(BookingError::CancellationWindowClosed(ticket_id.to_string()));
        }

        let ticket = tickets.remove(position);

        let mut inventory = self.catalog.inventory().await?;
        let space_restored = match ticket.parking_spot.as_deref() {
            Some(spot) => inventory.release(spot),
            None => false,
        };

        let notification = notices::ticket_cancelled(ticket.parking_spot.as_deref(), now);
        let mut notifications = self.repo.notifications(profile).await?;
        notifications.push(notification.clone());

        let mut uow = self.repo.begin();
        uow.put_tickets(profile, &tickets)?;
        uow.put_spaces(inventory.spaces())?;
        uow.put_notifications(profile, &notifications)?;
        uow.commit().await?;

        info!("Ticket {} cancelled by {} (space restored: {})", ticket.id, profile, space_restored);

        Ok(CancellationOutcome { ticket, space_restored, notification })
    }

    /// Drop tickets whose validity ended and free their spaces.
    /// Nothing is written when no ticket expired.
    pub async fn sweep_expired(&self, profile: &ProfileId, now: DateTime<Utc>) -> Result<usize, BookingError> {
        let _guard = self.repo.lock().await;

        let tickets = self.repo.tickets(profile).await?;
        let (expired, live): (Vec<Ticket>, Vec<Ticket>) = tickets.into_iter().partition(|t| t.is_expired(now));

        if expired.is_empty() {
            return Ok(0);
        }

        let mut inventory = self.catalog.inventory().await?;
        for spot in expired.iter().filter_map(|t| t.parking_spot.as_deref()) {
            inventory.release(spot);
        }

        let mut uow = self.repo.begin();
        uow.put_tickets(profile, &live)?;
        uow.put_spaces(inventory.spaces())?;
        uow.commit().await?;

        info!("Expired {} tickets for {}", expired.len(), profile);
        Ok(expired.len())
    }

    /// Sweep every profile that ever booked. A failing profile is logged and skipped.
    pub async fn sweep_all(&self, now: DateTime<Utc>) -> Result<usize, BookingError> {
        let mut removed = 0;
        for profile in self.repo.profiles().await? {
            match self.sweep_expired(&profile, now).await {
                Ok(count) => removed += count,
                Err(e) => warn!("Expiry sweep failed for {}: {}", profile, e),
            }
        }
        Ok(removed)
    }
}
