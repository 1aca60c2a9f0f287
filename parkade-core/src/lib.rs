pub mod repository;
pub mod identity;
pub mod payment;

pub use repository::{KvStore, KvWrite, StoreError};
pub use identity::ProfileId;
pub use payment::{PaymentGateway, PaymentMethod, PaymentStatus, DemoPaymentGateway};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
