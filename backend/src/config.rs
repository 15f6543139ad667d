//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Default SQLite location when `DB_URI` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite:app.db";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL or plain file path
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Configuration for a database at `url` with the default pool size
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
        }
    }

    /// Whether the URL points at a private in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5555),
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DB_URI").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(5),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::new("sqlite::memory:").is_in_memory());
        assert!(DatabaseConfig::new("sqlite:file:camp?mode=memory&cache=shared").is_in_memory());
        assert!(!DatabaseConfig::new("sqlite:app.db").is_in_memory());
    }

    #[test]
    fn test_server_addr_format() {
        let config = Config {
            server: ServerConfig {
                port: 5555,
                host: "127.0.0.1".to_string(),
            },
            database: DatabaseConfig::new(DEFAULT_DATABASE_URL),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:5555");
    }
}
