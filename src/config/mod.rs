use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::discovery::MissingCoordsPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscoveryConfig {
    /// How events without coordinates rank during geo-sort.
    #[serde(default)]
    pub missing_coords: MissingCoordsPolicy,
    /// Page size applied when a listing request carries no explicit limit.
    pub default_limit: i64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            missing_coords: MissingCoordsPolicy::default(),
            default_limit: 50,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("database.max_connections", 10)?
            .set_default("discovery.default_limit", 50)?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (with MILONGA__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("MILONGA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://milonga.db".to_string(),
                max_connections: 10,
            },
            discovery: DiscoveryConfig::default(),
        }
    }
}
