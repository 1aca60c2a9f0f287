use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use parkade_booking::{CancellationOutcome, TicketView};
use tracing::info;

use crate::error::AppError;
use crate::middleware::Profile;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", get(list_tickets))
        .route("/v1/tickets/{id}", delete(cancel_ticket))
}

async fn list_tickets(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<Vec<TicketView>>, AppError> {
    let tickets = state.services.tickets.active_tickets(&profile, Utc::now()).await?;
    Ok(Json(tickets))
}

async fn cancel_ticket(
    State(state): State<AppState>,
    Profile(profile): Profile,
    Path(ticket_id): Path<String>,
) -> Result<Json<CancellationOutcome>, AppError> {
    let outcome = state.services.tickets.cancel(&profile, &ticket_id, Utc::now()).await?;

    info!("Ticket {} cancelled for profile {}", ticket_id, profile);
    state.publish(&profile, &outcome.notification);

    Ok(Json(outcome))
}
