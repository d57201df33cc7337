//! Database row types. These map directly to SQLite rows.
//! Conversion into the fete-types models happens here so callers never see
//! the stored string encodings.

use anyhow::{Result, anyhow};
use fete_types::{Celebration, Wish};

pub struct CelebrationRow {
    pub id: String,
    pub event_type: String,
    pub recipient_name: String,
    pub message: String,
    pub flavor: String,
    /// JSON array of image payloads, NULL when the celebration has none.
    pub images: Option<String>,
    pub created_at: i64,
}

pub struct WishRow {
    pub id: String,
    pub celebration_id: String,
    pub name: String,
    pub message: String,
    pub created_at: i64,
}

impl TryFrom<CelebrationRow> for Celebration {
    type Error = anyhow::Error;

    fn try_from(row: CelebrationRow) -> Result<Self> {
        let images = row
            .images
            .as_deref()
            .map(serde_json::from_str::<Vec<String>>)
            .transpose()
            .map_err(|e| anyhow!("Corrupt images on celebration '{}': {}", row.id, e))?;

        Ok(Celebration {
            event_type: row.event_type.parse().map_err(|e| anyhow!("Celebration '{}': {}", row.id, e))?,
            flavor: row.flavor.parse().map_err(|e| anyhow!("Celebration '{}': {}", row.id, e))?,
            id: row.id,
            recipient_name: row.recipient_name,
            message: row.message,
            images,
            created_at: row.created_at,
        })
    }
}

impl From<WishRow> for Wish {
    fn from(row: WishRow) -> Self {
        Wish {
            id: row.id,
            celebration_id: row.celebration_id,
            name: row.name,
            message: row.message,
            created_at: row.created_at,
        }
    }
}
