use tracing::{debug, warn};

use fete_types::{
    Celebration, CelebrationInput, NewCelebration, NewWish, Wish, WishInput, new_id, now_millis,
};

use crate::config::{BackendConfig, ClientConfig};
use crate::error::{ClientError, RemoteError};
use crate::local::{LocalStore, sort_newest_first};
use crate::remote::RemoteBackend;

/// Backend-agnostic access to celebrations and wishes.
///
/// Every operation tries the remote backend first (when configured) and
/// serves the same call from the local store if the remote fails for any
/// reason. The two tiers are never reconciled: a record written locally
/// during an outage stays local.
pub struct Adapter {
    remote: Option<RemoteBackend>,
    local: LocalStore,
}

impl Adapter {
    pub fn new(backend: BackendConfig, local: LocalStore) -> Result<Self, ClientError> {
        let remote = match backend {
            BackendConfig::None => None,
            BackendConfig::Remote(config) => Some(RemoteBackend::new(&config)?),
        };
        Ok(Self { remote, local })
    }

    /// Build from env-derived config, opening the local store directory.
    pub async fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let local = LocalStore::open(config.local_dir).await?;
        Self::new(config.backend, local)
    }

    /// Whether a remote backend is configured. Says nothing about whether
    /// it is currently reachable.
    pub fn is_connected(&self) -> bool {
        self.remote.is_some()
    }

    pub fn backend_label(&self) -> &'static str {
        if self.is_connected() { "remote" } else { "local" }
    }

    /// Create a celebration. The id and timestamp are assigned here, so
    /// they are the same whichever tier ends up storing the record.
    pub async fn create(&self, input: &CelebrationInput) -> Result<Celebration, ClientError> {
        input.validate()?;
        let celebration = Celebration::from_input(input.clone(), new_id(), now_millis());

        if let Some(remote) = &self.remote {
            let req = NewCelebration {
                id: Some(celebration.id.clone()),
                created_at: Some(celebration.created_at),
                input: input.clone(),
            };
            match remote.create_celebration(&req).await {
                Ok(created) => return Ok(created),
                Err(e) => fallback("create", &e),
            }
        }

        Ok(self.local.insert_celebration(celebration).await?)
    }

    /// Fetch a celebration. `Ok(None)` means neither tier has it.
    pub async fn get(&self, id: &str) -> Result<Option<Celebration>, ClientError> {
        if let Some(remote) = &self.remote {
            match remote.get_celebration(id).await {
                Ok(celebration) => return Ok(Some(celebration)),
                // Might have been created locally while the remote was down.
                Err(e) if e.is_not_found() => debug!("Celebration {} not on remote, checking local store", id),
                Err(e) => fallback("get", &e),
            }
        }

        Ok(self.local.get_celebration(id).await?)
    }

    /// Add a wish. The celebration reference is not checked here.
    pub async fn add_wish(&self, input: &WishInput) -> Result<Wish, ClientError> {
        input.validate()?;
        let wish = Wish::from_input(input.clone(), new_id(), now_millis());

        if let Some(remote) = &self.remote {
            let req = NewWish {
                id: Some(wish.id.clone()),
                created_at: Some(wish.created_at),
                input: input.clone(),
            };
            match remote.add_wish(&req).await {
                Ok(added) => return Ok(added),
                Err(e) => fallback("add_wish", &e),
            }
        }

        Ok(self.local.insert_wish(wish).await?)
    }

    /// All wishes for a celebration, newest first.
    pub async fn list_wishes(&self, celebration_id: &str) -> Result<Vec<Wish>, ClientError> {
        if let Some(remote) = &self.remote {
            match remote.list_wishes(celebration_id).await {
                Ok(mut wishes) => {
                    sort_newest_first(&mut wishes);
                    return Ok(wishes);
                }
                Err(e) => fallback("list_wishes", &e),
            }
        }

        Ok(self.local.list_wishes(celebration_id).await?)
    }
}

fn fallback(op: &'static str, err: &RemoteError) {
    warn!("Remote {} failed, using local store: {}", op, err);
}
