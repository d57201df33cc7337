use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info};

use fete_types::{Celebration, Wish, new_id};

use crate::error::StoreError;

/// Key of the serialized celebrations collection.
pub const CELEBRATIONS_KEY: &str = "fete_celebrations";
/// Key of the serialized wishes collection.
pub const WISHES_KEY: &str = "fete_wishes";

enum Backing {
    /// One `{key}.json` file per collection.
    Dir(PathBuf),
    Memory(Mutex<HashMap<&'static str, String>>),
}

/// Device-local fallback store.
///
/// A tiny key-value store holding two collections, each a JSON array of
/// records in insertion order. Every write is a full read-modify-write of
/// one collection. Writes through one `LocalStore` are serialized; separate
/// stores over the same directory race and the last writer wins.
pub struct LocalStore {
    backing: Backing,
    write_lock: tokio::sync::Mutex<()>,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        info!("Local store directory: {}", dir.display());
        Ok(Self {
            backing: Backing::Dir(dir),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Store that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(Mutex::new(HashMap::new())),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    // -- Celebrations --

    pub async fn insert_celebration(&self, celebration: Celebration) -> Result<Celebration, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all: Vec<Celebration> = self.load(CELEBRATIONS_KEY).await?;
        all.push(celebration.clone());
        self.save(CELEBRATIONS_KEY, &all).await?;
        debug!("Stored celebration {} locally", celebration.id);
        Ok(celebration)
    }

    pub async fn get_celebration(&self, id: &str) -> Result<Option<Celebration>, StoreError> {
        let all: Vec<Celebration> = self.load(CELEBRATIONS_KEY).await?;
        Ok(all.into_iter().find(|c| c.id == id))
    }

    // -- Wishes --

    pub async fn insert_wish(&self, wish: Wish) -> Result<Wish, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all: Vec<Wish> = self.load(WISHES_KEY).await?;
        all.push(wish.clone());
        self.save(WISHES_KEY, &all).await?;
        debug!("Stored wish {} locally", wish.id);
        Ok(wish)
    }

    /// Wishes for one celebration, newest first. Wishes sharing a timestamp
    /// come back most recently inserted first.
    pub async fn list_wishes(&self, celebration_id: &str) -> Result<Vec<Wish>, StoreError> {
        let all: Vec<Wish> = self.load(WISHES_KEY).await?;
        let mut wishes: Vec<Wish> = all
            .into_iter()
            .filter(|w| w.celebration_id == celebration_id)
            .collect();
        // Latest insert first among equal timestamps.
        wishes.reverse();
        sort_newest_first(&mut wishes);
        Ok(wishes)
    }

    // -- Raw key-value access --

    async fn get_item(&self, key: &'static str) -> Result<Option<String>, StoreError> {
        match &self.backing {
            Backing::Dir(dir) => {
                let path = dir.join(format!("{}.json", key));
                match fs::read_to_string(&path).await {
                    Ok(data) => Ok(Some(data)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(source) => Err(StoreError::Io { path, source }),
                }
            }
            Backing::Memory(map) => {
                let map = map.lock().map_err(|_| StoreError::Poisoned)?;
                Ok(map.get(key).cloned())
            }
        }
    }

    async fn set_item(&self, key: &'static str, value: String) -> Result<(), StoreError> {
        match &self.backing {
            Backing::Dir(dir) => {
                // Write then rename so a crash never leaves a half-written
                // collection. Each write gets its own temp file.
                let path = dir.join(format!("{}.json", key));
                let tmp = dir.join(format!("{}.json.{}.tmp", key, new_id()));
                fs::write(&tmp, value).await.map_err(|source| StoreError::Io {
                    path: tmp.clone(),
                    source,
                })?;
                if let Err(source) = fs::rename(&tmp, &path).await {
                    let _ = fs::remove_file(&tmp).await;
                    return Err(StoreError::Io { path, source });
                }
                Ok(())
            }
            Backing::Memory(map) => {
                let mut map = map.lock().map_err(|_| StoreError::Poisoned)?;
                map.insert(key, value);
                Ok(())
            }
        }
    }

    async fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Vec<T>, StoreError> {
        match self.get_item(key).await? {
            Some(data) => serde_json::from_str(&data).map_err(|source| StoreError::Corrupt { key, source }),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T: Serialize>(&self, key: &'static str, items: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_string(items).map_err(|source| StoreError::Serialize { key, source })?;
        self.set_item(key, data).await
    }
}

/// Order by `createdAt` descending. The sort is stable, so equal timestamps
/// keep their relative order.
pub(crate) fn sort_newest_first(wishes: &mut [Wish]) {
    wishes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
