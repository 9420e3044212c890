//! Environment-driven settings.

use crate::error::AppError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit store location (`DATABASE_URL`), blank treated as unset.
    pub database_url: Option<String>,
    /// `APP_ENV` is `production` or `prod`.
    pub production: bool,
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, so tests need not touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let production = lookup("APP_ENV")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "production" | "prod"))
            .unwrap_or(false);

        let raw_bind = lookup("BIND_ADDR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_bind
            .parse()
            .map_err(|e| AppError::Config(format!("BIND_ADDR {:?}: {}", raw_bind, e)))?;

        Ok(Self {
            database_url,
            production,
            bind_addr,
        })
    }
}
