use anyhow::{Context, Result};
use std::env;

use crate::constants::{DEFAULT_MAX_CONNECTIONS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Reads the service settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("SQLITE_DB_URL").context("SQLITE_DB_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SERVER_PORT is not a valid port: {}", raw))?,
            Err(_) => DEFAULT_SERVER_PORT,
        };
        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {}", raw))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
