//! Ordered schema steps for the codex store.
//!
//! Each step runs in its own transaction and bumps `user_version` inside it,
//! so an interrupted upgrade resumes from the last step that committed.

use crate::db::{OpenResult, StoreOpenError};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaStep {
    pub(crate) version: u32,
    pub(crate) name: &'static str,
    pub(crate) sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_entries",
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Store layout version this build writes.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Layout version recorded in the open store; `0` for a fresh file.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

/// Brings `conn` up to [`latest_version`]. Returns the versions applied.
pub fn apply_migrations(conn: &mut Connection) -> OpenResult<Vec<u32>> {
    apply_steps(conn, STEPS)
}

pub(crate) fn apply_steps(conn: &mut Connection, steps: &[SchemaStep]) -> OpenResult<Vec<u32>> {
    let found = schema_version(conn).map_err(StoreOpenError::Setup)?;
    let supported = steps.last().map_or(0, |step| step.version);
    if found > supported {
        return Err(StoreOpenError::SchemaTooNew { found, supported });
    }

    let mut applied = Vec::new();
    for step in steps.iter().filter(|step| step.version > found) {
        run_step(conn, step).map_err(|source| StoreOpenError::Step {
            version: step.version,
            name: step.name,
            source,
        })?;
        debug!(
            "event=store_step module=db status=ok version={} name={}",
            step.version, step.name
        );
        applied.push(step.version);
    }

    if !applied.is_empty() {
        info!("event=store_upgrade module=db status=ok from={found} to={supported}");
    }
    Ok(applied)
}

fn run_step(conn: &mut Connection, step: &SchemaStep) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    tx.commit()
}
