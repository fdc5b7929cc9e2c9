use crate::error::{config_error, env_error, BoardResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Calendar id whose events are treated as waste/bin-collection entries
pub const DEFAULT_WASTE_CALENDAR_ID: &str = "calendar.bin_cycles";

/// Main configuration structure for the dashboard widgets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the calendar events API
    pub events_api_url: String,
    /// Calendar id marking waste/bin-collection events
    pub waste_calendar_id: String,
    /// Timezone used for date windows and the greeting
    pub timezone: String,
    /// Seconds between regular fetch cycles
    pub poll_interval_secs: u64,
    /// Maximum number of events requested per cycle
    pub event_limit: u32,
    /// Days past today covered by the query window
    pub lookahead_days: i64,
    /// Milliseconds between surface discovery retries at startup
    pub surface_retry_millis: u64,
    /// Seconds before the single retry after a not-found response
    pub not_found_retry_secs: u64,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> BoardResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let events_api_url =
            env::var("EVENTS_API_URL").map_err(|_| env_error("EVENTS_API_URL"))?;

        let waste_calendar_id = env::var("WASTE_CALENDAR_ID")
            .unwrap_or_else(|_| String::from(DEFAULT_WASTE_CALENDAR_ID));

        // Default timezone
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));

        let poll_interval_secs = parse_env_or("POLL_INTERVAL_SECS", 300)?;
        let event_limit = parse_env_or("EVENT_LIMIT", 20)?;
        let lookahead_days = parse_env_or("LOOKAHEAD_DAYS", 7)?;
        let surface_retry_millis = parse_env_or("SURFACE_RETRY_MILLIS", 500)?;
        let not_found_retry_secs = parse_env_or("NOT_FOUND_RETRY_SECS", 5)?;

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("event_feed".to_string(), true);
        components.insert("greeting".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            events_api_url,
            waste_calendar_id,
            timezone,
            poll_interval_secs,
            event_limit,
            lookahead_days,
            surface_retry_millis,
            not_found_retry_secs,
            components,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> BoardResult<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> BoardResult<T> {
    match env::var(var) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| config_error(&format!("Invalid {} format", var))),
        Err(_) => Ok(default),
    }
}
