use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parkade_booking::BookingError;
use parkade_catalog::InventoryError;
use parkade_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    PaymentRequired(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let msg = err.to_string();
        match err {
            BookingError::Store(_) | BookingError::PaymentGateway(_) => AppError::InternalServerError(msg),
            BookingError::Inventory(InventoryError::NotFound(_)) | BookingError::TicketNotFound(_) => {
                AppError::NotFoundError(msg)
            }
            BookingError::Inventory(InventoryError::Unavailable(_))
            | BookingError::CancellationWindowClosed(_)
            | BookingError::AlreadyMember
            | BookingError::NotMember => AppError::ConflictError(msg),
            BookingError::Pricing(_) | BookingError::SpaceTypeMismatch { .. } => AppError::ValidationError(msg),
            BookingError::PaymentDeclined(_) => AppError::PaymentRequired(msg),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkade_core::StoreError;

    fn status_of(err: BookingError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_booking_error_status_mapping() {
        assert_eq!(
            status_of(BookingError::Inventory(InventoryError::Unavailable("S2".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(BookingError::TicketNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(BookingError::CancellationWindowClosed("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(BookingError::PaymentDeclined("PayPal".into())), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            status_of(BookingError::Store(StoreError::Corrupt { key: "k".into(), reason: "eof".into() })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_validation_is_bad_request() {
        let err = AppError::from(CoreError::ValidationError("bad profile".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
