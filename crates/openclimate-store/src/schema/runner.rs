//! Applies embedded schema steps idempotently

use crate::errors::{from_rusqlite, schema_error, Result};
use crate::schema::checksums::compute_checksum;
use crate::schema::embedded::get_steps;
use rusqlite::{Connection, OptionalExtension};

/// Apply every schema step not yet recorded in `schema_version`
pub fn apply_schema(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for step in get_steps() {
        apply_step(conn, step.id, step.sql)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            step_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

fn apply_step(conn: &mut Connection, step_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE step_id = ?",
            [step_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(schema_error(
                step_id,
                &format!("checksum mismatch: recorded {}, embedded {}", recorded, checksum),
            ));
        }
        return Ok(());
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;

    tx.execute_batch(sql)
        .map_err(|e| schema_error(step_id, &e.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    tx.execute(
        "INSERT INTO schema_version (step_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![step_id, now, checksum],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(step_id, "schema step applied");
    Ok(())
}
