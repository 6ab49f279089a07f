//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.
//! Configuration is read once in `main` and handed to each component explicitly.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8080
/// - `DB_MAX_CONNECTIONS` / `DB_MIN_CONNECTIONS` (optional): pool bounds, default 10 / 1
/// - `DB_MAX_LIFETIME_SECS` (optional): connection lifetime, defaults to one hour
/// - `DB_IDLE_TIMEOUT_SECS` (optional): idle connection reap age, defaults to 30 minutes
/// - `DB_CONNECT_TIMEOUT_SECS` (optional): connect/acquire timeout, defaults to 5 seconds
/// - `HEALTH_CHECK_TIMEOUT_MS` (optional): health ping timeout, defaults to 1000ms
/// - `SHUTDOWN_TIMEOUT_SECS` (optional): drain period on shutdown, defaults to 30 seconds
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub db_min_connections: u32,

    #[serde(default = "default_max_lifetime_secs")]
    pub db_max_lifetime_secs: u64,

    #[serde(default = "default_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,

    #[serde(default = "default_health_check_timeout_ms")]
    pub health_check_timeout_ms: u64,

    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

/// Connection pool settings, projected out of [`Config`] for the database layer.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub connect_timeout: Duration,
    pub health_check_timeout: Duration,
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_lifetime_secs() -> u64 {
    60 * 60
}

fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_health_check_timeout_ms() -> u64 {
    1000
}

fn default_shutdown_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Pool settings for [`crate::db::create_pool`] and the repository.
    pub fn database(&self) -> DbConfig {
        DbConfig {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
            max_lifetime: Duration::from_secs(self.db_max_lifetime_secs),
            idle_timeout: Duration::from_secs(self.db_idle_timeout_secs),
            connect_timeout: Duration::from_secs(self.db_connect_timeout_secs),
            health_check_timeout: Duration::from_millis(self.health_check_timeout_ms),
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
