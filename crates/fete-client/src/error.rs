use std::path::PathBuf;

use thiserror::Error;

use fete_types::ValidationError;

/// Bad client configuration. Detected once, when the config is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL must be http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("invalid {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("could not build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

/// Anything that goes wrong talking to the remote backend.
/// Always recoverable: the adapter falls back to the local store.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status(status) if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

/// Local store failures. Terminal: there is no tier below the local store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt local collection '{key}': {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize local collection '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("local storage lock poisoned")]
    Poisoned,
}

/// What callers of the adapter can see.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
