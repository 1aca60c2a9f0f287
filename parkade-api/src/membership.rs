use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use parkade_booking::{MembershipChange, MembershipStatus, ProfileSnapshot};
use tracing::info;

use crate::error::AppError;
use crate::middleware::Profile;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/membership",
            get(membership_status).post(subscribe).delete(cancel_membership),
        )
        .route("/v1/profile", get(profile_snapshot))
}

async fn membership_status(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<MembershipStatus>, AppError> {
    Ok(Json(state.services.membership.status(&profile).await?))
}

async fn subscribe(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<MembershipChange>, AppError> {
    let change = state.services.membership.subscribe(&profile, Utc::now()).await?;

    info!("Profile {} subscribed to premium", profile);
    state.publish(&profile, &change.notification);

    Ok(Json(change))
}

async fn cancel_membership(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<MembershipChange>, AppError> {
    let change = state.services.membership.cancel(&profile, Utc::now()).await?;

    info!("Profile {} cancelled premium", profile);
    state.publish(&profile, &change.notification);

    Ok(Json(change))
}

/// Everything the client renders for one profile
async fn profile_snapshot(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<ProfileSnapshot>, AppError> {
    let snapshot = ProfileSnapshot::load(&state.services, &profile, Utc::now()).await?;
    Ok(Json(snapshot))
}
