pub mod catalog;
pub mod fulfillment;
pub mod notices;
pub mod orchestrator;
pub mod booking;
pub mod tickets;
pub mod membership;
pub mod notifications;
pub mod profile;

use std::sync::Arc;

use parkade_catalog::{InventoryError, PricingConfig, PricingEngine, PricingError, RateTable, SpaceInventory};
use parkade_core::{KvStore, PaymentGateway, StoreError};
use parkade_shared::SpaceType;
use parkade_store::app_config::{BusinessRules, CatalogConfig};
use parkade_store::ProfileRepository;
use serde::Serialize;

pub use booking::{BookingConfirmation, BookingRequest, BookingService};
pub use catalog::{CatalogService, SpaceListing};
pub use fulfillment::TicketIssuer;
pub use membership::{MembershipChange, MembershipPlan, MembershipService, MembershipStatus};
pub use notifications::{NotificationFeed, NotificationService};
pub use orchestrator::PaymentOrchestrator;
pub use profile::ProfileSnapshot;
pub use tickets::{CancellationOutcome, TicketService, TicketView};

/// View the client should switch to after an action
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NextView {
    Tickets,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Parking space {space_id} is {actual}, not {requested}")]
    SpaceTypeMismatch {
        space_id: String,
        requested: SpaceType,
        actual: SpaceType,
    },

    #[error("Payment declined via {0}")]
    PaymentDeclined(String),

    #[error("Payment gateway failure: {0}")]
    PaymentGateway(String),

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Cancellation window closed for ticket {0}")]
    CancellationWindowClosed(String),

    #[error("Premium membership already active")]
    AlreadyMember,

    #[error("No active premium membership")]
    NotMember,
}

/// Every service of the parking domain, wired over one key-value store
pub struct ParkingServices {
    pub catalog: CatalogService,
    pub booking: BookingService,
    pub tickets: TicketService,
    pub membership: MembershipService,
    pub notifications: NotificationService,
}

impl ParkingServices {
    pub fn new(
        kv: Arc<dyn KvStore>,
        rules: &BusinessRules,
        catalog: &CatalogConfig,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let repo = ProfileRepository::new(kv);
        let seed = catalog.spaces.clone().map(SpaceInventory::new).unwrap_or_default();
        let catalog = CatalogService::new(repo.clone(), seed);

        let pricing = PricingEngine::new(PricingConfig {
            rates: RateTable {
                standard_cents: rules.standard_rate_cents,
                premium_cents: rules.premium_rate_cents,
            },
            min_duration_hours: rules.min_duration_hours,
            max_duration_hours: rules.max_duration_hours,
        });

        Self {
            booking: BookingService::new(
                repo.clone(),
                catalog.clone(),
                pricing,
                TicketIssuer::new(&rules.qr_endpoint),
                PaymentOrchestrator::new(payments),
            ),
            tickets: TicketService::new(
                repo.clone(),
                catalog.clone(),
                chrono::Duration::seconds(rules.cancellation_window_seconds),
            ),
            membership: MembershipService::new(
                repo.clone(),
                MembershipPlan::monthly(rules.membership_price_cents, rules.membership_term_days),
            ),
            notifications: NotificationService::new(repo),
            catalog,
        }
    }
}
