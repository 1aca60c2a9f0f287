use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Succeeded,
    Declined,
}

/// Payment options offered at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
    Apple,
    Google,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::Apple,
        PaymentMethod::Google,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Apple => "Apple Pay",
            PaymentMethod::Google => "Google Pay",
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize a charge of `amount_cents` with the given method
    async fn authorize(
        &self,
        method: PaymentMethod,
        amount_cents: i64,
    ) -> Result<PaymentStatus, Box<dyn std::error::Error + Send + Sync>>;
}

/// Gateway that accepts every method without validation
pub struct DemoPaymentGateway;

#[async_trait]
impl PaymentGateway for DemoPaymentGateway {
    async fn authorize(
        &self,
        method: PaymentMethod,
        amount_cents: i64,
    ) -> Result<PaymentStatus, Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!("Demo payment accepted: {} cents via {:?}", amount_cents, method);
        Ok(PaymentStatus::Succeeded)
    }
}
