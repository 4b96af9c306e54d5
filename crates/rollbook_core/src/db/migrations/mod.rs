//! Schema migrations for the slot table.
//!
//! # Responsibility
//! - Create and evolve `kv_slots`, the table that backs every persistent
//!   slot (`students`, `students_next_id`).
//! - Apply pending steps atomically and mirror progress to `PRAGMA user_version`.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly 1.
//! - Steps only touch table shape; slot payloads (the JSON student array) are
//!   opaque text and are never rewritten here.
//! - A database newer than this binary is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SlotTableStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SlotTableStep] = &[SlotTableStep {
    version: 1,
    name: "kv_slots",
    sql: include_str!("0001_kv_slots.sql"),
}];

/// Returns the newest slot-table version known by this binary.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Brings the slot table up to `latest_version()` in one transaction.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `DbError::Sqlite` when a step fails; nothing is applied in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        debug!("event=db_migrate module=db status=noop version={latest}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in STEPS.iter().filter(|step| step.version > from_version) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} step={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

fn user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, user_version, STEPS};
    use rusqlite::Connection;

    #[test]
    fn step_versions_are_contiguous_from_one() {
        for (index, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
    }

    #[test]
    fn applying_twice_leaves_slots_untouched() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES ('students', '[]');",
            [],
        )
        .unwrap();

        apply_migrations(&mut conn).unwrap();
        assert_eq!(user_version(&conn).unwrap(), latest_version());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
