//! Process configuration read from the environment.

use std::net::SocketAddr;

use anyhow::{Context, bail};
use chrono::Duration;

use tally_auth::DEFAULT_SESSION_TTL_HOURS;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub session_ttl: Duration,
}

impl ApiConfig {
    /// Load from `TALLY_BIND_ADDR`, `JWT_SECRET` and `SESSION_TTL_HOURS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("TALLY_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("TALLY_BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => bail!("JWT_SECRET must not be empty"),
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let ttl_hours = match lookup("SESSION_TTL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .context("SESSION_TTL_HOURS must be an integer")?,
            None => DEFAULT_SESSION_TTL_HOURS,
        };
        if ttl_hours <= 0 {
            bail!("SESSION_TTL_HOURS must be positive, got {ttl_hours}");
        }

        Ok(Self {
            bind_addr,
            jwt_secret,
            session_ttl: Duration::hours(ttl_hours),
        })
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}
