use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use scan2share_db::DEFAULT_STORAGE_KEY;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port: u16 = match get("SCAN2SHARE_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SCAN2SHARE_PORT is not a port number: {}", raw))?,
            None => 3000,
        };

        Ok(Self {
            db_path: get("SCAN2SHARE_DB_PATH")
                .unwrap_or_else(|| "scan2share.db".into())
                .into(),
            storage_key: get("SCAN2SHARE_STORAGE_KEY")
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.into()),
            host: get("SCAN2SHARE_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
