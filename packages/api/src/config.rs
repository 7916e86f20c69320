use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 5;
pub const DEFAULT_HUB_CHANNEL_CAPACITY: usize = 32;

/// Server settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Minimum spacing between two requests from one IP. Zero disables
    /// rate limiting.
    pub rate_limit_window: Duration,
    pub hub_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            rate_limit_window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECS),
            hub_channel_capacity: DEFAULT_HUB_CHANNEL_CAPACITY,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            rate_limit_window: Duration::from_secs(parse_or(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            )),
            hub_channel_capacity: parse_or(
                &lookup,
                "HUB_CHANNEL_CAPACITY",
                defaults.hub_channel_capacity,
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using {}", raw, key, default);
            default
        }),
    }
}
