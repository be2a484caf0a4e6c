use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Process configuration, read from the environment once at startup and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub bind: SocketAddr,
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("API_TOKEN").context("API_TOKEN is not set")?;

        let bind = std::env::var("WEATHER_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("invalid WEATHER_BIND: {bind}"))?;

        // Seconds; defaults to 12 hours.
        let cache_ttl_secs = match std::env::var("WEATHER_CACHE_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid WEATHER_CACHE_SECS: {raw}"))?,
            Err(_) => 43_200,
        };

        Ok(Self {
            api_token,
            bind,
            cache_ttl_secs,
        })
    }
}
