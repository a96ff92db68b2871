use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How display tokens are numbered within one (association, date) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenPolicy {
    /// Urgent bookings get `U1, U2, ...`, everything else `T1, T2, ...`.
    #[default]
    Urgency,
    /// One counter for every booking: `T1, T2, T3, ...`.
    Sequential,
}

impl FromStr for TokenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgency" | "dual" => Ok(TokenPolicy::Urgency),
            "sequential" | "single" => Ok(TokenPolicy::Sequential),
            other => Err(format!("unknown token policy: {}", other)),
        }
    }
}

impl fmt::Display for TokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPolicy::Urgency => write!(f, "urgency"),
            TokenPolicy::Sequential => write!(f, "sequential"),
        }
    }
}

pub const DEFAULT_URGENT_THRESHOLD: i32 = 80;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub token_policy: TokenPolicy,
    /// Urgency scores strictly above this value count as urgent.
    pub urgent_threshold: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            token_policy: TokenPolicy::default(),
            urgent_threshold: DEFAULT_URGENT_THRESHOLD,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    warn!("SERVER_HOST not set, using {}", defaults.server_host);
                    defaults.server_host.clone()
                }),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            token_policy: parse_var("TOKEN_POLICY", defaults.token_policy),
            urgent_threshold: parse_var("URGENT_THRESHOLD", defaults.urgent_threshold),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_policy_parsing() {
        assert_eq!("urgency".parse::<TokenPolicy>(), Ok(TokenPolicy::Urgency));
        assert_eq!(" Sequential ".parse::<TokenPolicy>(), Ok(TokenPolicy::Sequential));
        assert!("round-robin".parse::<TokenPolicy>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.token_policy, TokenPolicy::Urgency);
        assert_eq!(config.urgent_threshold, 80);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("MEDICARE_TEST_PORT", "not-a-port");
        assert_eq!(parse_var("MEDICARE_TEST_PORT", 3000u16), 3000);
        env::set_var("MEDICARE_TEST_PORT", "8080");
        assert_eq!(parse_var("MEDICARE_TEST_PORT", 3000u16), 8080);
        env::remove_var("MEDICARE_TEST_PORT");
    }
}
