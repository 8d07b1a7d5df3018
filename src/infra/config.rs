//! For reading application configuration.

use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
    /// How long a single request may take before it is aborted.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// The maximum number of requests handled at the same time.
    pub concurrency_limit: usize,
}

/// Where records are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// A PostgreSQL database.
    Postgres,
    /// Process memory. Nothing survives a restart.
    Memory,
}

/// Database configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Which storage backend to use.
    pub backend: StorageBackend,
    /// The database username.
    pub username: String,
    /// The database password.
    pub password: String,
    /// The database port.
    pub port: u16,
    /// The database name.
    pub database_name: String,
    /// The database host.
    pub host: String,
    /// The maximum number of pooled connections.
    pub max_connections: u32,
    /// How long to wait for a free connection.
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

/// Retrieve [`Config`] from defaults, the optional `config` file and the environment.
///
/// The `PORT` variable takes precedence over every other source of `server.http_port`.
#[tracing::instrument]
pub fn load_config() -> color_eyre::Result<Config> {
    build_config(std::env::var("PORT").ok())
}

fn build_config(port: Option<String>) -> color_eyre::Result<Config> {
    let config = config::Config::builder()
        .set_default("server.http_address", "0.0.0.0")?
        .set_default("server.http_port", 8080)?
        .set_default("server.request_timeout", "10s")?
        .set_default("server.concurrency_limit", 500)?
        .set_default("database.backend", "postgres")?
        .set_default("database.username", "abcpharmacyuser")?
        .set_default("database.password", "your_password")?
        .set_default("database.port", 5432)?
        .set_default("database.database_name", "abcpharmacy")?
        .set_default("database.host", "localhost")?
        .set_default("database.max_connections", 20)?
        .set_default("database.acquire_timeout", "5s")?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .set_override_option("server.http_port", port)?
        .build()?
        .try_deserialize()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_variable_overrides_http_port() {
        let config = build_config(Some("9090".to_string())).unwrap();
        assert_eq!(9090, config.server.http_port);
    }

    #[test]
    fn durations_are_read_as_humantime() {
        let config = build_config(None).unwrap();
        assert_eq!(Duration::from_secs(10), config.server.request_timeout);
        assert_eq!(Duration::from_secs(5), config.database.acquire_timeout);
    }

    #[test]
    fn unparsable_port_is_rejected() {
        assert!(build_config(Some("eighty".to_string())).is_err());
    }
}
