use std::sync::Arc;
use std::time::Duration;

use parkade_booking::ParkingServices;
use parkade_core::{DemoPaymentGateway, KvStore, ProfileId};
use parkade_shared::{Notification, NotificationPostedEvent};
use parkade_store::app_config::Config;
use parkade_store::InMemoryKvStore;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ParkingServices>,
    pub sse_tx: broadcast::Sender<NotificationPostedEvent>,
    pub sweep_interval: Duration,
}

impl AppState {
    pub fn new(kv: Arc<dyn KvStore>, config: &Config) -> Self {
        let services = ParkingServices::new(
            kv,
            &config.business_rules,
            &config.catalog,
            Arc::new(DemoPaymentGateway),
        );
        let (sse_tx, _) = broadcast::channel(100);

        Self {
            services: Arc::new(services),
            sse_tx,
            sweep_interval: Duration::from_secs(config.business_rules.sweep_interval_seconds.max(1)),
        }
    }

    pub fn in_memory(config: &Config) -> Self {
        Self::new(Arc::new(InMemoryKvStore::new()), config)
    }

    /// Fan a freshly stored notification out to stream subscribers
    pub fn publish(&self, profile: &ProfileId, notification: &Notification) {
        // No subscribers is not an error
        let _ = self.sse_tx.send(NotificationPostedEvent {
            profile_id: profile.to_string(),
            notification: notification.clone(),
        });
    }
}
