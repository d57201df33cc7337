use crate::models::{CelebrationRow, WishRow};
use crate::Database;
use anyhow::Result;
use fete_types::{Celebration, Wish};
use rusqlite::Connection;

impl Database {
    // -- Celebrations --

    /// Insert a celebration. Returns `false` if the id is already taken.
    pub fn insert_celebration(&self, celebration: &Celebration) -> Result<bool> {
        let images = celebration
            .images
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO celebrations
                     (id, event_type, recipient_name, message, flavor, images, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    celebration.id,
                    celebration.event_type.as_str(),
                    celebration.recipient_name,
                    celebration.message,
                    celebration.flavor.as_str(),
                    images,
                    celebration.created_at,
                ],
            )?;
            Ok(inserted == 1)
        })
    }

    pub fn get_celebration(&self, id: &str) -> Result<Option<Celebration>> {
        let row = self.with_conn(|conn| query_celebration(conn, id))?;
        row.map(Celebration::try_from).transpose()
    }

    // -- Wishes --

    /// Insert a wish. Returns `false` if the id is already taken.
    /// Fails if `celebration_id` does not reference an existing celebration.
    pub fn insert_wish(&self, wish: &Wish) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO wishes (id, celebration_id, name, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    wish.id,
                    wish.celebration_id,
                    wish.name,
                    wish.message,
                    wish.created_at,
                ],
            )?;
            Ok(inserted == 1)
        })
    }

    /// All wishes for a celebration, newest first.
    pub fn get_wishes(&self, celebration_id: &str) -> Result<Vec<Wish>> {
        let rows = self.with_conn(|conn| query_wishes(conn, celebration_id))?;
        Ok(rows.into_iter().map(Wish::from).collect())
    }
}

fn query_celebration(conn: &Connection, id: &str) -> Result<Option<CelebrationRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, event_type, recipient_name, message, flavor, images, created_at
         FROM celebrations WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(CelebrationRow {
                id: row.get(0)?,
                event_type: row.get(1)?,
                recipient_name: row.get(2)?,
                message: row.get(3)?,
                flavor: row.get(4)?,
                images: row.get(5)?,
                created_at: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_wishes(conn: &Connection, celebration_id: &str) -> Result<Vec<WishRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, celebration_id, name, message, created_at
         FROM wishes
         WHERE celebration_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt
        .query_map([celebration_id], |row| {
            Ok(WishRow {
                id: row.get(0)?,
                celebration_id: row.get(1)?,
                name: row.get(2)?,
                message: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
