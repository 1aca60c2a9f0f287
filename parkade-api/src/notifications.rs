use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures_util::future::ready;
use futures_util::stream::{Stream, StreamExt};
use parkade_booking::NotificationFeed;
use parkade_core::ProfileId;
use parkade_shared::{Notification, NotificationPostedEvent};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::error::AppError;
use crate::middleware::Profile;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/notifications", get(list_notifications))
        .route("/v1/notifications/open", post(open_panel))
        .route("/v1/notifications/stream", get(stream_notifications))
}

async fn list_notifications(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<NotificationFeed>, AppError> {
    Ok(Json(state.services.notifications.list(&profile).await?))
}

/// Returns the feed as it was before opening, then marks everything read
async fn open_panel(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Result<Json<NotificationFeed>, AppError> {
    Ok(Json(state.services.notifications.open_panel(&profile).await?))
}

async fn stream_notifications(
    State(state): State<AppState>,
    Profile(profile): Profile,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = profile_notifications(state.sse_tx.subscribe(), profile).filter_map(|notification| {
        ready(
            Event::default()
                .event("notification")
                .json_data(&notification)
                .ok()
                .map(Ok),
        )
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Notifications posted for `profile`, skipping every other profile's events.
/// Lagged receivers drop the missed events and keep streaming.
pub fn profile_notifications(
    rx: broadcast::Receiver<NotificationPostedEvent>,
    profile: ProfileId,
) -> impl Stream<Item = Notification> {
    BroadcastStream::new(rx).filter_map(move |result| {
        let matched = match result {
            Ok(event) if event.profile_id == profile.as_str() => Some(event.notification),
            _ => None,
        };
        ready(matched)
    })
}
