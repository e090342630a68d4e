use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::civil_now;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{close_open_session, insert_session, load_sessions_for_date};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{parse_date_arg, parse_timestamp_arg, today};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session {
        user,
        task,
        start,
        end,
        stop,
        list,
        date,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) STOP — close the most recent open session
        //
        if *stop {
            let now = civil_now();
            close_open_session(&pool.conn, user, &now)?;

            audit(&pool.conn, "session", user, "Closed open session")?;
            success(format!("Open session for {} closed.", user));
            return Ok(());
        }

        //
        // 2) ADD — explicit start, optional end (open session)
        //
        if let Some(start_str) = start {
            let task = task
                .as_deref()
                .ok_or_else(|| AppError::Config("Missing --task for session".into()))?;

            let started_at = parse_timestamp_arg(start_str)?;
            let ended_at = end.as_deref().map(parse_timestamp_arg).transpose()?;

            insert_session(&pool.conn, user, task, &started_at, ended_at.as_ref())?;

            audit(
                &pool.conn,
                "session",
                &format!("{} / {}", user, task),
                &format!(
                    "Session {} → {}",
                    started_at.format("%Y-%m-%d %H:%M"),
                    ended_at
                        .map(|e| e.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "open".to_string())
                ),
            )?;

            success(format!(
                "Session for {} on task '{}' recorded{}.",
                user,
                task,
                if ended_at.is_none() { " (open)" } else { "" }
            ));
            return Ok(());
        }

        //
        // 3) LIST
        //
        if *list {
            let d = match date {
                Some(s) => parse_date_arg(s)?,
                None => today(),
            };

            let sessions = load_sessions_for_date(&mut pool, user, &d)?;

            if sessions.is_empty() {
                println!("No sessions for {} on {}.", user, d);
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("TASK", 20),
                Column::new("START", 16),
                Column::new("END", 16),
            ]);

            for s in &sessions {
                table.add_row(vec![
                    s.id.to_string(),
                    s.task.clone(),
                    s.started_at.format("%Y-%m-%d %H:%M").to_string(),
                    s.ended_at
                        .map(|e| e.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "(open)".to_string()),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
