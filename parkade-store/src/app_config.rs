use parkade_shared::ParkingSpace;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub redis: RedisConfig,
    pub business_rules: BusinessRules,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BusinessRules {
    pub standard_rate_cents: i64,
    pub premium_rate_cents: i64,
    pub min_duration_hours: u32,
    pub max_duration_hours: u32,
    pub cancellation_window_seconds: i64,
    pub sweep_interval_seconds: u64,
    pub membership_price_cents: i64,
    pub membership_term_days: i64,
    pub qr_endpoint: String,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            standard_rate_cents: 250,
            premium_rate_cents: 500,
            min_duration_hours: 1,
            max_duration_hours: 24,
            cancellation_window_seconds: 300,
            sweep_interval_seconds: 60,
            membership_price_cents: 5000,
            membership_term_days: 30,
            qr_endpoint: "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=".to_string(),
        }
    }
}

impl BusinessRules {
    /// Reject rule sets the booking services cannot operate with
    pub fn validate(&self) -> Result<(), String> {
        if self.min_duration_hours == 0 {
            return Err("business_rules.min_duration_hours must be at least 1".to_string());
        }
        if self.min_duration_hours > self.max_duration_hours {
            return Err(format!(
                "business_rules.min_duration_hours ({}) exceeds max_duration_hours ({})",
                self.min_duration_hours, self.max_duration_hours
            ));
        }
        if self.standard_rate_cents < 0 || self.premium_rate_cents < 0 || self.membership_price_cents < 0 {
            return Err("business_rules prices must not be negative".to_string());
        }
        if self.cancellation_window_seconds < 0 {
            return Err("business_rules.cancellation_window_seconds must not be negative".to_string());
        }
        if self.sweep_interval_seconds == 0 {
            return Err("business_rules.sweep_interval_seconds must be at least 1".to_string());
        }
        if self.membership_term_days < 1 {
            return Err("business_rules.membership_term_days must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: "redis://127.0.0.1:6379".to_string() }
    }
}

/// Seed for the space catalog; `None` keeps the built-in four-space layout
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub spaces: Option<Vec<ParkingSpace>>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // PARKADE_SERVER__PORT=9000 sets server.port
            .add_source(
                config::Environment::with_prefix("PARKADE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_source(s)
    }

    /// Deserialize a built source and check the business rules
    pub fn from_source(source: config::Config) -> Result<Self, config::ConfigError> {
        let config: Self = source.try_deserialize()?;
        config.business_rules.validate().map_err(config::ConfigError::Message)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.business_rules.standard_rate_cents, 250);
        assert_eq!(config.business_rules.premium_rate_cents, 500);
        assert_eq!(config.business_rules.cancellation_window_seconds, 300);
        assert!(config.catalog.spaces.is_none());
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                "[business_rules]\npremium_rate_cents = 600\n\n[storage]\nbackend = \"redis\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config = Config::from_source(s).unwrap();

        assert_eq!(config.business_rules.premium_rate_cents, 600);
        assert_eq!(config.business_rules.standard_rate_cents, 250);
        assert_eq!(config.storage.backend, StorageBackend::Redis);
    }

    fn load_toml(toml: &str) -> Result<Config, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Config::from_source(s)
    }

    #[test]
    fn test_invalid_business_rules_rejected() {
        let zero_min = load_toml("[business_rules]\nmin_duration_hours = 0\n");
        assert!(matches!(zero_min, Err(config::ConfigError::Message(_))));

        let inverted = load_toml("[business_rules]\nmin_duration_hours = 5\nmax_duration_hours = 2\n");
        assert!(matches!(inverted, Err(config::ConfigError::Message(_))));

        let negative_window = load_toml("[business_rules]\ncancellation_window_seconds = -1\n");
        assert!(matches!(negative_window, Err(config::ConfigError::Message(_))));

        assert!(load_toml("[business_rules]\nmax_duration_hours = 48\n").is_ok());
    }
}
