use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (celebrations, wishes)");
        conn.execute_batch(
            "
            CREATE TABLE celebrations (
                id              TEXT PRIMARY KEY,
                event_type      TEXT NOT NULL,
                recipient_name  TEXT NOT NULL,
                message         TEXT NOT NULL,
                flavor          TEXT NOT NULL,
                images          TEXT,
                created_at      INTEGER NOT NULL
            );

            CREATE TABLE wishes (
                id              TEXT PRIMARY KEY,
                celebration_id  TEXT NOT NULL REFERENCES celebrations(id),
                name            TEXT NOT NULL,
                message         TEXT NOT NULL,
                created_at      INTEGER NOT NULL
            );

            CREATE INDEX idx_wishes_celebration
                ON wishes(celebration_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    Ok(())
}
