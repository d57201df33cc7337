//! Connection diagnostics: is the database usable, and is the API that
//! clients are configured for reachable?

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use fete_client::{BackendConfig, ClientConfig, RemoteBackend};
use fete_db::Database;
use fete_server::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    fete_server::init("fete_check=info,fete_db=info");

    let mut failures = 0;

    let server = ServerConfig::from_env()?;
    if let Err(e) = check_database(&server) {
        error!("Database check failed: {:#}", e);
        failures += 1;
    }

    match ClientConfig::from_env().context("client configuration")? {
        ClientConfig { backend: BackendConfig::None, .. } => {
            warn!("FETE_API_URL is not set: clients will use local storage only");
        }
        ClientConfig { backend: BackendConfig::Remote(remote), .. } => {
            if let Err(e) = check_api(&remote).await {
                error!("API check failed: {:#}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} check(s) failed", failures);
    }
    info!("All checks passed");
    Ok(())
}

fn check_database(config: &ServerConfig) -> Result<()> {
    if !config.db_path.exists() {
        warn!("{} does not exist yet; it will be created", config.db_path.display());
    }
    let db = Database::open(&config.db_path)?;
    let version = db.sqlite_version()?;
    info!("Database OK (SQLite {})", version);
    Ok(())
}

async fn check_api(remote: &fete_client::RemoteConfig) -> Result<()> {
    let url = &remote.base_url;
    let host = url.host_str().context("API URL has no host")?;
    let port = url.port_or_known_default().unwrap_or(80);

    info!("Resolving {}...", host);
    let addrs: Vec<_> = tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("DNS lookup for {} failed", host))?
        .collect();
    info!("Resolved {} to {:?}", host, addrs);

    let backend = RemoteBackend::new(remote)?;
    let health = backend.health().await?;
    info!("API at {} reports status '{}'", url, health.status);
    Ok(())
}
