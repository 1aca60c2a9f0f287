use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::state::AppState;

/// Periodically removes expired tickets and frees their spaces
pub fn spawn_expiry_sweeper(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(state.sweep_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Ticket expiry sweeper running every {:?}", state.sweep_interval);

        loop {
            interval.tick().await;
            match state.services.tickets.sweep_all(Utc::now()).await {
                Ok(0) => {}
                Ok(removed) => info!("Expired {} ticket(s)", removed),
                Err(e) => error!("Ticket expiry sweep failed: {}", e),
            }
        }
    })
}
