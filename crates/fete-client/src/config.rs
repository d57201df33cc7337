use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the local store lives when `FETE_LOCAL_DIR` is unset.
pub const DEFAULT_LOCAL_DIR: &str = "./fete-local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL of the REST surface, including its mount prefix
    /// (e.g. `http://localhost:3000/api`).
    pub base_url: Url,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }

        Ok(Self {
            base_url: url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Which tiers the adapter may use. Decided once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Local store only.
    None,
    /// Try the remote first, fall back to the local store per call.
    Remote(RemoteConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub local_dir: PathBuf,
}

impl ClientConfig {
    /// Read `FETE_API_URL`, `FETE_API_TIMEOUT_SECS` and `FETE_LOCAL_DIR`.
    ///
    /// An unset or empty `FETE_API_URL` means no remote backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("FETE_API_URL").filter(|url| !url.trim().is_empty()) {
            None => BackendConfig::None,
            Some(url) => {
                let mut remote = RemoteConfig::new(url.trim())?;
                if let Some(secs) = lookup("FETE_API_TIMEOUT_SECS") {
                    let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                        var: "FETE_API_TIMEOUT_SECS",
                        value: secs.clone(),
                    })?;
                    remote = remote.with_timeout(Duration::from_secs(secs));
                }
                BackendConfig::Remote(remote)
            }
        };

        let local_dir = lookup("FETE_LOCAL_DIR")
            .unwrap_or_else(|| DEFAULT_LOCAL_DIR.into())
            .into();

        Ok(Self { backend, local_dir })
    }
}
