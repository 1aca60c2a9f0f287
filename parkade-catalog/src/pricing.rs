use parkade_shared::SpaceType;
use serde::{Deserialize, Serialize};

/// Hourly rates per space type, in euro cents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    pub standard_cents: i64,
    pub premium_cents: i64,
}

impl RateTable {
    pub fn hourly(&self, space_type: SpaceType) -> i64 {
        match space_type {
            SpaceType::Standard => self.standard_cents,
            SpaceType::Premium => self.premium_cents,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            standard_cents: 250,
            premium_cents: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub rates: RateTable,
    pub min_duration_hours: u32,
    pub max_duration_hours: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            min_duration_hours: 1,
            max_duration_hours: 24,
        }
    }
}

/// Booking length in whole hours, validated against the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingDuration(u32);

impl BookingDuration {
    pub fn hours(&self) -> u32 {
        self.0
    }

    pub fn as_chrono(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.0))
    }
}

/// Price quote for a type and duration
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Quote {
    pub space_type: SpaceType,
    pub duration_hours: u32,
    pub hourly_rate_cents: i64,
    pub total_cents: i64,
    /// Membership waived the charge
    pub waived: bool,
    pub display: String,
}

pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn duration(&self, hours: u32) -> Result<BookingDuration, PricingError> {
        if hours < self.config.min_duration_hours || hours > self.config.max_duration_hours {
            return Err(PricingError::DurationOutOfRange {
                requested: hours,
                min: self.config.min_duration_hours,
                max: self.config.max_duration_hours,
            });
        }
        Ok(BookingDuration(hours))
    }

    /// Members pay nothing regardless of type or duration
    pub fn quote(&self, space_type: SpaceType, duration: BookingDuration, is_member: bool) -> Quote {
        let hourly_rate_cents = self.config.rates.hourly(space_type);
        let total_cents = if is_member {
            0
        } else {
            hourly_rate_cents * i64::from(duration.hours())
        };

        Quote {
            space_type,
            duration_hours: duration.hours(),
            hourly_rate_cents,
            total_cents,
            waived: is_member,
            display: if is_member { "Free".to_string() } else { format_eur(total_cents) },
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

/// Format cents as a euro amount with two decimals, e.g. `€7.50`
pub fn format_eur(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}€{}.{:02}", sign, abs / 100, abs % 100)
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Duration of {requested} hours is outside {min}-{max}")]
    DurationOutOfRange {
        requested: u32,
        min: u32,
        max: u32,
    },
}
