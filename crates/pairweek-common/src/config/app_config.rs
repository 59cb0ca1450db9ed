//! Application configuration structs
//!
//! Loads configuration from environment variables.

use chrono::Weekday;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub scheduler: SchedulerConfig,
    pub matching: MatchingConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Periodic trigger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Day of week the pairing run fires
    #[serde(default = "default_pairing_weekday")]
    pub pairing_weekday: Weekday,
    /// UTC hour the pairing run fires
    #[serde(default = "default_pairing_hour")]
    pub pairing_hour_utc: u32,
    /// Days of week reminder scans fire
    #[serde(default = "default_reminder_weekdays")]
    pub reminder_weekdays: Vec<Weekday>,
    /// How often the pairing trigger wakes to check the clock
    #[serde(default = "default_pairing_tick_secs")]
    pub pairing_tick_secs: u64,
    /// How often the reminder trigger wakes to check the clock
    #[serde(default = "default_reminder_tick_secs")]
    pub reminder_tick_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            pairing_weekday: default_pairing_weekday(),
            pairing_hour_utc: default_pairing_hour(),
            reminder_weekdays: default_reminder_weekdays(),
            pairing_tick_secs: default_pairing_tick_secs(),
            reminder_tick_secs: default_reminder_tick_secs(),
        }
    }
}

/// Matching policy knobs
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchingConfig {
    /// Maximum reminders per match
    #[serde(default = "default_reminder_cap")]
    pub reminder_cap: i32,
    /// Window within which a past sit-out counts as "recent"
    #[serde(default = "default_sit_out_window_weeks")]
    pub sit_out_window_weeks: i64,
    /// Upper bound on the user-requested skip duration
    #[serde(default = "default_max_skip_weeks")]
    pub max_skip_weeks: u32,
    /// Default page size for match history
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            reminder_cap: default_reminder_cap(),
            sit_out_window_weeks: default_sit_out_window_weeks(),
            max_skip_weeks: default_max_skip_weeks(),
            history_limit: default_history_limit(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "pairweek".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_pairing_weekday() -> Weekday {
    Weekday::Sun
}

fn default_pairing_hour() -> u32 {
    10
}

fn default_reminder_weekdays() -> Vec<Weekday> {
    vec![Weekday::Tue, Weekday::Thu]
}

fn default_pairing_tick_secs() -> u64 {
    3600 // hourly clock check
}

fn default_reminder_tick_secs() -> u64 {
    43200 // every 12 hours
}

fn default_reminder_cap() -> i32 {
    2
}

fn default_sit_out_window_weeks() -> i64 {
    4
}

fn default_max_skip_weeks() -> u32 {
    8
}

fn default_history_limit() -> i64 {
    10
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    /// or unparseable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            scheduler: SchedulerConfig {
                pairing_weekday: parse_optional_var("PAIRING_WEEKDAY", default_pairing_weekday)?,
                pairing_hour_utc: {
                    let hour: u32 = parse_optional_var("PAIRING_HOUR_UTC", default_pairing_hour)?;
                    if hour > 23 {
                        return Err(ConfigError::InvalidValue(
                            "PAIRING_HOUR_UTC",
                            hour.to_string(),
                        ));
                    }
                    hour
                },
                reminder_weekdays: match env::var("REMINDER_WEEKDAYS") {
                    Ok(raw) => parse_weekday_list(&raw)?,
                    Err(_) => default_reminder_weekdays(),
                },
                pairing_tick_secs: parse_optional_var("PAIRING_TICK_SECS", default_pairing_tick_secs)?,
                reminder_tick_secs: parse_optional_var(
                    "REMINDER_TICK_SECS",
                    default_reminder_tick_secs,
                )?,
            },
            matching: MatchingConfig {
                reminder_cap: parse_optional_var("REMINDER_CAP", default_reminder_cap)?,
                sit_out_window_weeks: parse_optional_var(
                    "SIT_OUT_WINDOW_WEEKS",
                    default_sit_out_window_weeks,
                )?,
                max_skip_weeks: parse_optional_var("MAX_SKIP_WEEKS", default_max_skip_weeks)?,
                history_limit: parse_optional_var("HISTORY_LIMIT", default_history_limit)?,
            },
        })
    }
}

/// Parse an optional env var, falling back to a default when unset and
/// failing loudly when set but malformed
fn parse_optional_var<T: std::str::FromStr>(
    name: &'static str,
    default: fn() -> T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

/// Parse a comma-separated weekday list (e.g. "tue,thu")
fn parse_weekday_list(raw: &str) -> Result<Vec<Weekday>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Weekday>()
                .map_err(|_| ConfigError::InvalidValue("REMINDER_WEEKDAYS", s.to_string()))
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
