use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use parkade_booking::SpaceListing;
use parkade_core::PaymentMethod;
use parkade_shared::SpaceType;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpacesQuery {
    #[serde(rename = "type")]
    pub space_type: Option<SpaceType>,
}

#[derive(Debug, Serialize)]
pub struct PaymentMethodOption {
    pub id: PaymentMethod,
    pub name: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/spaces", get(list_spaces))
        .route("/v1/payment-methods", get(list_payment_methods))
}

async fn list_spaces(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SpacesQuery>,
) -> Result<Json<Vec<SpaceListing>>, AppError> {
    let types = match query.space_type {
        Some(space_type) => vec![space_type],
        None => vec![SpaceType::Standard, SpaceType::Premium],
    };

    let mut listings = Vec::with_capacity(types.len());
    for space_type in types {
        listings.push(state.services.booking.available_spaces(space_type).await?);
    }

    Ok(Json(listings))
}

async fn list_payment_methods() -> Json<Vec<PaymentMethodOption>> {
    Json(
        PaymentMethod::ALL
            .iter()
            .map(|method| PaymentMethodOption {
                id: *method,
                name: method.display_name(),
            })
            .collect(),
    )
}
