//! Vitalboard core library
//!
//! Real-time patient vitals dashboard engine: an echo-WebSocket telemetry
//! channel, change detection with transient highlights, and a categorical
//! filtering / sorting / pagination pipeline over a mutating row set.

pub mod core;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod roster;
pub mod telemetry;

pub use error::Error;

/// Application configuration
pub mod config {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub telemetry: TelemetryConfig,
        pub table: TableConfig,
        pub roster: RosterConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct TelemetryConfig {
        /// Echo WebSocket endpoint used as the vitals relay.
        pub url: String,
        /// Milliseconds between synthetic readings.
        pub interval_ms: u64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct TableConfig {
        pub page_size: usize,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct RosterConfig {
        /// Number of patients to derive from the id provider.
        pub size: usize,
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Config, config::ConfigError> {
        let env = std::env::var("VITALBOARD_ENV").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            // Start with default settings
            .add_source(config::File::with_name("config/default"))
            // Override with environment-specific settings
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("VITALBOARD").separator("__"))
            .build()?
            .try_deserialize()
    }
}
