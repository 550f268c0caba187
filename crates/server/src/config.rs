use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_FETCH_TIMEOUT: u64 = 15;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server settings read from `PRECIS_*` and `DATABASE_URL` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Enables persistence when set.
    pub database_url: Option<String>,
    pub dictionary: Option<PathBuf>,
    pub noise: Option<PathBuf>,
    pub fetch_timeout: u64,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr = get("PRECIS_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr.parse().with_context(|| format!("parse PRECIS_ADDR {addr:?}"))?;

        let fetch_timeout = match get("PRECIS_FETCH_TIMEOUT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("parse PRECIS_FETCH_TIMEOUT {raw:?}"))?,
            None => DEFAULT_FETCH_TIMEOUT,
        };

        Ok(Self {
            addr,
            database_url: get("DATABASE_URL"),
            dictionary: get("PRECIS_DICTIONARY").map(PathBuf::from),
            noise: get("PRECIS_NOISE").map(PathBuf::from),
            fetch_timeout,
        })
    }

    /// Database host for log lines; never includes credentials.
    pub fn database_host(&self) -> Option<String> {
        let raw = self.database_url.as_deref()?;
        let parsed = url::Url::parse(raw).ok()?;
        let host = parsed.host_str()?;
        Some(match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }
}
