//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `ticketing.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;
use ticketing_domain::error::TicketingError;
use ticketing_domain::event::NewEvent;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Events inserted into an empty store at startup.
    pub seed: SeedConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// How long a booking waits for the write lock, in milliseconds.
    pub lock_timeout_ms: u64,
    /// Connection pool size.
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Initial inventory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub events: Vec<SeedEvent>,
}

/// One `[[seed.events]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEvent {
    pub name: String,
    pub available_tickets: i64,
}

impl Config {
    /// Load configuration from `ticketing.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("ticketing.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("TICKETING_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("TICKETING_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("TICKETING_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("TICKETING_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(ms) = var("TICKETING_LOCK_TIMEOUT_MS").and_then(|val| val.parse().ok()) {
            self.database.lock_timeout_ms = ms;
        }
        if let Some(max) = var("TICKETING_MAX_CONNECTIONS").and_then(|val| val.parse().ok()) {
            self.database.max_connections = max;
        }
        if let Some(val) = var("TICKETING_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.database.lock_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "lock_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "max_connections must be non-zero".to_string(),
            ));
        }
        self.seed_events().map_err(ConfigError::Seed)?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Storage adapter settings derived from the `[database]` section.
    #[must_use]
    pub fn storage(&self) -> ticketing_adapter_storage_sqlite_sqlx::Config {
        ticketing_adapter_storage_sqlite_sqlx::Config {
            database_url: self.database.url.clone(),
            lock_timeout: Duration::from_millis(self.database.lock_timeout_ms),
            max_connections: self.database.max_connections,
        }
    }

    /// Convert the `[[seed.events]]` tables into validated domain values.
    ///
    /// # Errors
    ///
    /// Returns the first domain validation failure.
    pub fn seed_events(&self) -> Result<Vec<NewEvent>, TicketingError> {
        self.seed
            .events
            .iter()
            .map(|event| {
                NewEvent::builder()
                    .name(event.name.clone())
                    .available_tickets(event.available_tickets)
                    .build()
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:ticketing.db?mode=rwc".to_string(),
            lock_timeout_ms: 5000,
            max_connections: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "ticketingd=info,ticketing=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A seed event breaks a domain invariant.
    #[error("invalid seed event")]
    Seed(#[source] TicketingError),
}
