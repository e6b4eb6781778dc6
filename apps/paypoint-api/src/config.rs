//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                      | Default         |
//! |-------------------------------|-----------------|
//! | `PAYPOINT_HTTP_PORT`          | `8080`          |
//! | `PAYPOINT_BIND_ADDR`          | `0.0.0.0`       |
//! | `PAYPOINT_DATABASE_PATH`      | `./paypoint.db` |
//! | `PAYPOINT_DB_MAX_CONNECTIONS` | `5`             |
//! | `PAYPOINT_GRAPHQL_PLAYGROUND` | `true`          |
//! | `PAYPOINT_LOG_FORMAT`         | `compact`       |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    Compact,
}

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// A log format name other than `pretty` or `compact`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log format: {0} (expected pretty or compact)")]
pub struct UnknownLogFormat(pub String);

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_addr: IpAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Serve the GraphQL playground on `GET /graphql`
    pub graphql_playground: bool,

    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            http_port: parse_var(&lookup, "PAYPOINT_HTTP_PORT", "8080")?,
            bind_addr: parse_var(&lookup, "PAYPOINT_BIND_ADDR", "0.0.0.0")?,
            database_path: PathBuf::from(
                lookup("PAYPOINT_DATABASE_PATH").unwrap_or_else(|| "./paypoint.db".to_string()),
            ),
            db_max_connections: parse_var(&lookup, "PAYPOINT_DB_MAX_CONNECTIONS", "5")?,
            graphql_playground: parse_var(&lookup, "PAYPOINT_GRAPHQL_PLAYGROUND", "true")?,
            log_format: parse_var(&lookup, "PAYPOINT_LOG_FORMAT", "compact")?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PAYPOINT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_path, PathBuf::from("./paypoint.db"));
        assert_eq!(config.db_max_connections, 5);
        assert!(config.graphql_playground);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PAYPOINT_HTTP_PORT", "9000"),
            ("PAYPOINT_BIND_ADDR", "127.0.0.1"),
            ("PAYPOINT_DATABASE_PATH", "/var/lib/paypoint/db.sqlite"),
            ("PAYPOINT_DB_MAX_CONNECTIONS", "12"),
            ("PAYPOINT_GRAPHQL_PLAYGROUND", "false"),
            ("PAYPOINT_LOG_FORMAT", "Pretty"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/paypoint/db.sqlite")
        );
        assert_eq!(config.db_max_connections, 12);
        assert!(!config.graphql_playground);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!("PRETTY".parse::<LogFormat>(), Ok(LogFormat::Pretty));

        let err = "json".parse::<LogFormat>().unwrap_err();
        assert_eq!(err, UnknownLogFormat("json".to_string()));
        assert_eq!(
            err.to_string(),
            "Unknown log format: json (expected pretty or compact)"
        );
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("PAYPOINT_HTTP_PORT", "eighty"),
            ("PAYPOINT_HTTP_PORT", "70000"),
            ("PAYPOINT_BIND_ADDR", "localhost:80"),
            ("PAYPOINT_DB_MAX_CONNECTIONS", "0"),
            ("PAYPOINT_GRAPHQL_PLAYGROUND", "yes"),
            ("PAYPOINT_LOG_FORMAT", "json"),
        ];

        for (name, value) in cases {
            match load(&[(name, value)]) {
                Err(ConfigError::InvalidValue(var)) => assert_eq!(var, name),
                Ok(_) => panic!("{name}={value} should be rejected"),
            }
        }
    }
}
