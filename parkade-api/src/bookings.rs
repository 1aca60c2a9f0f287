use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use parkade_booking::{BookingConfirmation, BookingRequest};
use parkade_catalog::Quote;
use parkade_shared::SpaceType;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::extract::ApiJson;
use crate::middleware::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub duration_hours: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/quotes", post(quote))
        .route("/v1/bookings", post(book))
}

async fn quote(
    State(state): State<AppState>,
    Profile(profile): Profile,
    ApiJson(req): ApiJson<QuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    let quote = state
        .services
        .booking
        .quote(&profile, req.space_type, req.duration_hours)
        .await?;

    Ok(Json(quote))
}

async fn book(
    State(state): State<AppState>,
    Profile(profile): Profile,
    ApiJson(req): ApiJson<BookingRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), AppError> {
    let confirmation = state.services.booking.book(&profile, req, Utc::now()).await?;

    info!(
        "Booked space {:?} for profile {} ({})",
        confirmation.ticket.parking_spot, profile, confirmation.quote.display
    );
    state.publish(&profile, &confirmation.notification);

    Ok((StatusCode::CREATED, Json(confirmation)))
}
