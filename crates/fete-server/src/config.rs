use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl ServerConfig {
    /// Read `FETE_HOST`, `FETE_PORT` and `FETE_DB_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("FETE_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("FETE_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("FETE_PORT must be a port number")?;
        let db_path = lookup("FETE_DB_PATH").unwrap_or_else(|| "fete.db".into()).into();

        Ok(Self { host, port, db_path })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
