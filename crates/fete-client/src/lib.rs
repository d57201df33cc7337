//! Fete client-side data access.
//!
//! [`Adapter`] is the one entry point callers need: four operations over
//! celebrations and wishes, served by the remote REST backend when one is
//! configured and reachable, and by the device-local [`LocalStore`]
//! otherwise. Remote failures are logged and absorbed; only local-store
//! failures reach the caller.

pub mod adapter;
pub mod config;
pub mod error;
pub mod local;
pub mod remote;

pub use adapter::Adapter;
pub use config::{BackendConfig, ClientConfig, RemoteConfig};
pub use error::{ClientError, ConfigError, RemoteError, StoreError};
pub use local::LocalStore;
pub use remote::RemoteBackend;
