use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration version has already been applied.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Mark a migration version as applied.
fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the base schema: break windows, attendance, work sessions.
fn migrate_base_schema(conn: &Connection) -> Result<()> {
    let version = "20250412_0001_base_schema";

    if migration_applied(conn, version)? {
        return Ok(()); // già presente → OK
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS break_windows (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            label       TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            kind        TEXT NOT NULL DEFAULT 'standard'
                        CHECK(kind IN ('standard','pre_shift_exempt')),
            active      INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user         TEXT NOT NULL,
            date         TEXT NOT NULL,
            clock_in     TEXT,
            clock_out    TEXT,
            work_minutes INTEGER,
            created_at   TEXT NOT NULL,
            UNIQUE(user, date)
        );

        CREATE TABLE IF NOT EXISTS work_sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user        TEXT NOT NULL,
            task        TEXT NOT NULL DEFAULT '',
            started_at  TEXT NOT NULL,
            ended_at    TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_user_date ON attendance(user, date);
        CREATE INDEX IF NOT EXISTS idx_sessions_user_start ON work_sessions(user, started_at);
        "#,
    )?;

    mark_applied(conn, version, "Created base schema")?;
    success(format!("Migration applied: {} → base schema", version));

    Ok(())
}

/// Add the anomaly-clear marker table.
///
/// The reconciliation engine never touches this table; it records a human
/// dismissing a flagged discrepancy so the report listings can skip it.
fn migrate_anomaly_clears(conn: &Connection) -> Result<()> {
    let version = "20250430_0002_anomaly_clears";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS anomaly_clears (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user       TEXT NOT NULL,
            date       TEXT NOT NULL,
            cleared_by TEXT NOT NULL,
            cleared_at TEXT NOT NULL,
            UNIQUE(user, date)
        );
        "#,
    )?;

    mark_applied(conn, version, "Added anomaly_clears table")?;
    success(format!("Migration applied: {} → anomaly_clears", version));

    Ok(())
}

/// Add the `kind` column to break_windows created before 0.3.0.
fn migrate_break_kind_column(conn: &Connection) -> Result<()> {
    let version = "20250522_0003_break_kind";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let mut stmt = conn.prepare("PRAGMA table_info('break_windows')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut has_kind = false;
    for c in cols {
        if c? == "kind" {
            has_kind = true;
            break;
        }
    }

    if !has_kind {
        conn.execute(
            "ALTER TABLE break_windows ADD COLUMN kind TEXT NOT NULL DEFAULT 'standard';",
            [],
        )?;
    }

    mark_applied(conn, version, "Added kind column to break_windows")?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    migrate_base_schema(conn)?;

    // 3) Incremental migrations
    migrate_anomaly_clears(conn)?;
    migrate_break_kind_column(conn)?;

    Ok(())
}
