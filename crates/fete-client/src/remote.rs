use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use fete_types::{Celebration, HealthResponse, NewCelebration, NewWish, Wish};

use crate::config::RemoteConfig;
use crate::error::{ConfigError, RemoteError};

/// HTTP client for the fete REST surface.
pub struct RemoteBackend {
    client: Client,
    base_url: Url,
}

impl RemoteBackend {
    pub fn new(config: &RemoteConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path; RemoteConfig rejects other schemes.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn create_celebration(&self, req: &NewCelebration) -> Result<Celebration, RemoteError> {
        let res = self
            .client
            .post(self.url(&["celebrations"]))
            .json(req)
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        read_json(res).await
    }

    pub async fn get_celebration(&self, id: &str) -> Result<Celebration, RemoteError> {
        let res = self
            .client
            .get(self.url(&["celebrations", id]))
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        read_json(res).await
    }

    pub async fn add_wish(&self, req: &NewWish) -> Result<Wish, RemoteError> {
        let res = self
            .client
            .post(self.url(&["wishes"]))
            .json(req)
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        read_json(res).await
    }

    pub async fn list_wishes(&self, celebration_id: &str) -> Result<Vec<Wish>, RemoteError> {
        let res = self
            .client
            .get(self.url(&["wishes", celebration_id]))
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        read_json(res).await
    }

    pub async fn health(&self) -> Result<HealthResponse, RemoteError> {
        let res = self
            .client
            .get(self.url(&["health"]))
            .send()
            .await
            .map_err(RemoteError::Transport)?;
        read_json(res).await
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, RemoteError> {
    let status = res.status();
    if !status.is_success() {
        return Err(RemoteError::Status(status));
    }
    res.json::<T>().await.map_err(RemoteError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> RemoteBackend {
        RemoteBackend::new(&RemoteConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn urls_extend_the_mount_prefix() {
        let remote = backend("http://localhost:3000/api");
        assert_eq!(
            remote.url(&["celebrations", "abc"]).as_str(),
            "http://localhost:3000/api/celebrations/abc"
        );

        let remote = backend("http://localhost:3000/api/");
        assert_eq!(remote.url(&["wishes"]).as_str(), "http://localhost:3000/api/wishes");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let remote = backend("http://localhost:3000/api");
        assert_eq!(
            remote.url(&["celebrations", "a/b c"]).as_str(),
            "http://localhost:3000/api/celebrations/a%2Fb%20c"
        );
    }
}
