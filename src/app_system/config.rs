//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_TOKEN_SECRET` - Bearer token signing secret (min 32 chars)
//!
//! ## Optional
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 8080)
//! - `SHOP_TOKEN_TTL_HOURS` - Token lifetime in hours, at most one year (default: 24)
//! - `SHOP_STOCK_POLICY` - `read-modify-write` or `atomic-reserve` (default: read-modify-write)
//! - `SHOP_COMPENSATE_ON_FAILURE` - Undo partial order commits (default: false)
//! - `SHOP_ACTOR_BUFFER` - Mailbox size for each resource actor (default: 32)

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How the order workflow takes units out of stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockPolicy {
    /// Read the stock, subtract, write the result back. Concurrent orders for
    /// the same product can both pass the stock check and oversell.
    #[default]
    ReadModifyWrite,
    /// Let the product actor decrement only when enough stock remains.
    AtomicReserve,
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read-modify-write" => Ok(Self::ReadModifyWrite),
            "atomic-reserve" => Ok(Self::AtomicReserve),
            other => Err(format!("unknown stock policy '{other}'")),
        }
    }
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadModifyWrite => f.write_str("read-modify-write"),
            Self::AtomicReserve => f.write_str("atomic-reserve"),
        }
    }
}

/// Settings consumed by the order workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderSettings {
    pub stock_policy: StockPolicy,
    /// Delete created line items and restore stock when a commit fails part way.
    pub compensate_on_failure: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer token signing secret
    pub token_secret: SecretString,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
    pub orders: OrderSettings,
    /// Mailbox size for each resource actor
    pub actor_buffer: usize,
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token_secret = lookup("SHOP_TOKEN_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOP_TOKEN_SECRET".to_string()))?;
        if token_secret.len() < MIN_TOKEN_SECRET_LENGTH {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_TOKEN_SECRET".to_string(),
                format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
            ));
        }

        let token_ttl_hours: i64 = parse_or(&lookup, "SHOP_TOKEN_TTL_HOURS", 24)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_TOKEN_TTL_HOURS".to_string(),
                format!("must be between 1 and {MAX_TOKEN_TTL_HOURS}"),
            ));
        }

        let actor_buffer: usize = parse_or(&lookup, "SHOP_ACTOR_BUFFER", 32)?;
        if actor_buffer == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_ACTOR_BUFFER".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            host: parse_or(&lookup, "SHOP_HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse_or(&lookup, "SHOP_PORT", 8080)?,
            token_secret: SecretString::from(token_secret),
            token_ttl_hours,
            orders: OrderSettings {
                stock_policy: parse_or(&lookup, "SHOP_STOCK_POLICY", StockPolicy::default())?,
                compensate_on_failure: parse_or(&lookup, "SHOP_COMPENSATE_ON_FAILURE", false)?,
            },
            actor_buffer,
        })
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Token lifetime as a duration.
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        Duration::try_hours(self.token_ttl_hours).ok_or_else(|| {
            ConfigError::InvalidEnvVar("SHOP_TOKEN_TTL_HOURS".to_string(), "out of range".to_string())
        })
    }

    pub fn token_secret(&self) -> &str {
        self.token_secret.expose_secret()
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SHOP_TOKEN_SECRET", SECRET)]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.orders, OrderSettings::default());
        assert_eq!(config.orders.stock_policy, StockPolicy::ReadModifyWrite);
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.token_secret(), SECRET);
        assert_eq!(config.token_ttl(), Ok(Duration::hours(24)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOP_TOKEN_SECRET", SECRET),
            ("SHOP_HOST", "0.0.0.0"),
            ("SHOP_PORT", "9000"),
            ("SHOP_STOCK_POLICY", "atomic-reserve"),
            ("SHOP_COMPENSATE_ON_FAILURE", "true"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.orders.stock_policy, StockPolicy::AtomicReserve);
        assert!(config.orders.compensate_on_failure);
    }

    #[test]
    fn test_missing_and_invalid() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::MissingEnvVar("SHOP_TOKEN_SECRET".to_string())
        );
        assert!(matches!(
            load(&[("SHOP_TOKEN_SECRET", "short")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "SHOP_TOKEN_SECRET"
        ));
        assert!(matches!(
            load(&[("SHOP_TOKEN_SECRET", SECRET), ("SHOP_PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "SHOP_PORT"
        ));
        for ttl in ["0", "-5", "8761", "10000000000"] {
            assert!(matches!(
                load(&[("SHOP_TOKEN_SECRET", SECRET), ("SHOP_TOKEN_TTL_HOURS", ttl)]),
                Err(ConfigError::InvalidEnvVar(key, _)) if key == "SHOP_TOKEN_TTL_HOURS"
            ));
        }
        assert_eq!(
            load(&[("SHOP_TOKEN_SECRET", SECRET), ("SHOP_TOKEN_TTL_HOURS", "8760")])
                .unwrap()
                .token_ttl(),
            Ok(Duration::hours(8760))
        );
        assert!(matches!(
            load(&[("SHOP_TOKEN_SECRET", SECRET), ("SHOP_STOCK_POLICY", "locking")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "SHOP_STOCK_POLICY"
        ));
    }
}
