//! Ordered schema scripts for the record store.
//!
//! # Invariants
//! - Script versions start at 1 and increase by exactly one.
//! - A database is migrated inside one transaction: all pending scripts or none.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: [Migration; 2] = [
    Migration {
        version: 1,
        name: "calendar_diet",
        sql: include_str!("0001_calendar_diet.sql"),
    },
    Migration {
        version: 2,
        name: "fitness",
        sql: include_str!("0002_fitness.sql"),
    },
];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `Migration` naming the first script that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let mut pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version)
        .peekable();
    if pending.peek().is_none() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        run_migration(&tx, migration)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest}"
    );
    Ok(())
}

fn run_migration(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    debug!(
        "event=db_migrate_step module=db status=start version={} name={}",
        migration.version, migration.name
    );
    tx.execute_batch(migration.sql)
        .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
        .map_err(|source| DbError::Migration {
            version: migration.version,
            name: migration.name,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, current_user_version, latest_version, MIGRATIONS};
    use rusqlite::Connection;

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1, "{}", migration.name);
        }
    }

    #[test]
    fn partially_migrated_database_only_runs_pending_scripts() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(MIGRATIONS[0].sql).unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();

        apply_migrations(&mut conn).unwrap();
        assert_eq!(current_user_version(&conn).unwrap(), latest_version());

        let workouts: i64 = conn
            .query_row("SELECT COUNT(*) FROM workouts;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(workouts, 0);
    }
}
