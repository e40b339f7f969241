//! # Configuration
//!
//! Process configuration loaded once from the environment at startup and
//! passed into server setup. Handlers never read the environment.

use std::env;

use thiserror::Error;

/// Default cutoff for the fuzzy area lookup, matching pg_trgm's
/// `pg_trgm.similarity_threshold` default.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 3000)
    pub port: u16,

    /// Postgres connection string (required)
    pub database_url: String,

    /// Static API key clients must send in `x-api-key` (required)
    pub api_key: String,

    /// Minimum name similarity accepted by the fuzzy area lookup
    pub similarity_threshold: f32,

    /// CORS allowed origins; empty means permissive
    pub cors_origins: Vec<String>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// Environment variable is set but unusable
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn parse_port(raw: String) -> Result<u16, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidVar {
        name: "PORT",
        value: raw,
    })
}

fn parse_threshold(raw: String) -> Result<f32, ConfigError> {
    let threshold: f32 = raw.parse().map_err(|_| ConfigError::InvalidVar {
        name: "SIMILARITY_THRESHOLD",
        value: raw.clone(),
    })?;

    // similarity() scores live in [0, 1]
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::InvalidVar {
            name: "SIMILARITY_THRESHOLD",
            value: raw,
        });
    }

    Ok(threshold)
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// `API_KEY` and `DATABASE_URL` are required; `HOST`, `PORT`,
    /// `SIMILARITY_THRESHOLD`, and `CORS_ORIGINS` (comma-separated) are
    /// optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| default_host());

        let port = match env::var("PORT") {
            Ok(raw) => parse_port(raw)?,
            Err(_) => default_port(),
        };

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let api_key = env::var("API_KEY").map_err(|_| ConfigError::MissingVar("API_KEY"))?;

        let similarity_threshold = match env::var("SIMILARITY_THRESHOLD") {
            Ok(raw) => parse_threshold(raw)?,
            Err(_) => DEFAULT_SIMILARITY_THRESHOLD,
        };

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            database_url,
            api_key,
            similarity_threshold,
            cors_origins,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> AppConfig {
        AppConfig {
            host: default_host(),
            port: default_port(),
            database_url: "postgres://localhost/laserum".to_string(),
            api_key: "secret".to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            cors_origins: Vec::new(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let mut config = sample_config();
        config.port = 8080;
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("3001".to_string()).unwrap(), 3001);
        assert!(parse_port("not-a-port".to_string()).is_err());
        assert!(parse_port("70000".to_string()).is_err());
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("0.5".to_string()).unwrap(), 0.5);
        assert!(parse_threshold("1.5".to_string()).is_err());
        assert!(parse_threshold("-0.1".to_string()).is_err());
        assert!(parse_threshold("high".to_string()).is_err());
    }
}
