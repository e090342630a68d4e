use crate::core::clock::parse_time;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::break_window::{BreakKind, BreakWindow};
use crate::models::work_session::WorkSession;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M";

// ---------------------------------------------------------------------------
// Break windows
// ---------------------------------------------------------------------------

/// Load break windows. With `only_active`, inactive rows are filtered out.
///
/// Rows whose times or kind fail to parse are skipped individually — one bad
/// window must not block the rest of the table.
pub fn load_break_windows(pool: &mut DbPool, only_active: bool) -> AppResult<Vec<BreakWindow>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, label, start_time, end_time, kind, active
         FROM break_windows
         ORDER BY start_time ASC, id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>("id")?,
            row.get::<_, String>("label")?,
            row.get::<_, String>("start_time")?,
            row.get::<_, String>("end_time")?,
            row.get::<_, String>("kind")?,
            row.get::<_, i64>("active")?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, label, start_s, end_s, kind_s, active) = r?;

        let (Some(start_min), Some(end_min)) = (parse_time(&start_s), parse_time(&end_s)) else {
            continue;
        };
        let Some(kind) = BreakKind::from_db_str(&kind_s) else {
            continue;
        };

        let active = active != 0;
        if only_active && !active {
            continue;
        }

        out.push(BreakWindow {
            id,
            label,
            start_min,
            end_min,
            kind,
            active,
        });
    }

    Ok(out)
}

/// Snapshot of the active break windows for one batch run.
pub fn list_active_break_windows(pool: &mut DbPool) -> AppResult<Vec<BreakWindow>> {
    load_break_windows(pool, true)
}

pub fn insert_break_window(
    conn: &Connection,
    label: &str,
    start_time: &str,
    end_time: &str,
    kind: BreakKind,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO break_windows (label, start_time, end_time, kind, active)
         VALUES (?1, ?2, ?3, ?4, 1)",
        params![label, start_time, end_time, kind.to_db_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn set_break_window_active(conn: &Connection, id: i64, active: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE break_windows SET active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;

    if changed == 0 {
        return Err(AppError::BreakWindowNotFound(id));
    }
    Ok(())
}

pub fn delete_break_window(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM break_windows WHERE id = ?1", params![id])?;

    if changed == 0 {
        return Err(AppError::BreakWindowNotFound(id));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

fn map_attendance_row(row: &Row) -> Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        user: row.get("user")?,
        date,
        clock_in: row.get("clock_in")?,
        clock_out: row.get("clock_out")?,
        work_minutes: row.get("work_minutes")?,
    })
}

pub fn load_attendance(
    pool: &mut DbPool,
    user: &str,
    date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, user, date, clock_in, clock_out, work_minutes
         FROM attendance
         WHERE user = ?1 AND date = ?2",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rec = stmt
        .query_row(params![user, date_str], map_attendance_row)
        .optional()?;

    Ok(rec)
}

/// Insert or update the attendance record for (user, date).
///
/// `work_minutes` is the recomputed derived value; callers pass the output
/// of the normalizer + break subtraction so the stored figure never drifts
/// from the raw stamps.
pub fn upsert_attendance(
    conn: &Connection,
    user: &str,
    date: &NaiveDate,
    clock_in: Option<&str>,
    clock_out: Option<&str>,
    work_minutes: i64,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance (user, date, clock_in, clock_out, work_minutes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user, date) DO UPDATE SET
             clock_in     = excluded.clock_in,
             clock_out    = excluded.clock_out,
             work_minutes = excluded.work_minutes",
        params![
            user,
            date.format("%Y-%m-%d").to_string(),
            clock_in,
            clock_out,
            work_minutes,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Work sessions
// ---------------------------------------------------------------------------

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(s.to_string())),
        )
    })
}

fn map_session_row(row: &Row) -> Result<WorkSession> {
    let started_str: String = row.get("started_at")?;
    let ended_str: Option<String> = row.get("ended_at")?;

    let started_at = parse_timestamp(&started_str)?;
    let ended_at = match ended_str {
        Some(s) => Some(parse_timestamp(&s)?),
        None => None,
    };

    Ok(WorkSession {
        id: row.get("id")?,
        user: row.get("user")?,
        task: row.get("task")?,
        started_at,
        ended_at,
    })
}

/// All sessions whose logical work-date (day of `started_at`) matches.
pub fn load_sessions_for_date(
    pool: &mut DbPool,
    user: &str,
    date: &NaiveDate,
) -> AppResult<Vec<WorkSession>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, user, task, started_at, ended_at
         FROM work_sessions
         WHERE user = ?1 AND substr(started_at, 1, 10) = ?2
         ORDER BY started_at ASC",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map(params![user, date_str], map_session_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_session(
    conn: &Connection,
    user: &str,
    task: &str,
    started_at: &NaiveDateTime,
    ended_at: Option<&NaiveDateTime>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO work_sessions (user, task, started_at, ended_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user,
            task,
            started_at.format(TIMESTAMP_FMT).to_string(),
            ended_at.map(|e| e.format(TIMESTAMP_FMT).to_string()),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Close the most recent open session for a user. Errors if none is open.
pub fn close_open_session(
    conn: &Connection,
    user: &str,
    ended_at: &NaiveDateTime,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE work_sessions
         SET ended_at = ?1
         WHERE id = (
             SELECT id FROM work_sessions
             WHERE user = ?2 AND ended_at IS NULL
             ORDER BY started_at DESC
             LIMIT 1
         )",
        params![ended_at.format(TIMESTAMP_FMT).to_string(), user],
    )?;

    if changed == 0 {
        return Err(AppError::NoOpenSession(user.to_string()));
    }
    Ok(())
}

/// Users with either an attendance record or a session on the given date.
pub fn list_users_for_date(pool: &mut DbPool, date: &NaiveDate) -> AppResult<Vec<String>> {
    let mut stmt = pool.conn.prepare(
        "SELECT user FROM attendance WHERE date = ?1
         UNION
         SELECT user FROM work_sessions WHERE substr(started_at, 1, 10) = ?1
         ORDER BY user ASC",
    )?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let rows = stmt.query_map([date_str], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Anomaly clears (caller-owned marker; the engine never reads these)
// ---------------------------------------------------------------------------

pub fn insert_anomaly_clear(
    conn: &Connection,
    user: &str,
    date: &NaiveDate,
    cleared_by: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO anomaly_clears (user, date, cleared_by, cleared_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user, date) DO UPDATE SET
             cleared_by = excluded.cleared_by,
             cleared_at = excluded.cleared_at",
        params![
            user,
            date.format("%Y-%m-%d").to_string(),
            cleared_by,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn is_cleared(pool: &mut DbPool, user: &str, date: &NaiveDate) -> AppResult<bool> {
    let mut stmt = pool
        .conn
        .prepare("SELECT 1 FROM anomaly_clears WHERE user = ?1 AND date = ?2 LIMIT 1")?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let exists = stmt.exists(params![user, date_str])?;

    Ok(exists)
}
