pub mod pricing;
pub mod inventory;

pub use pricing::{BookingDuration, PricingConfig, PricingEngine, PricingError, Quote, RateTable, format_eur};
pub use inventory::{InventoryError, SpaceInventory};
