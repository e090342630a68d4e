use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::parse_time;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_break_window, insert_break_window, load_break_windows, set_break_window_active,
};
use crate::errors::{AppError, AppResult};
use crate::models::break_window::BreakKind;
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Breaks {
        add,
        label,
        start,
        end,
        kind,
        list,
        enable,
        disable,
        del,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) ADD
        //
        if *add {
            let label = label
                .as_deref()
                .ok_or_else(|| AppError::Config("Missing --label for breaks --add".into()))?;
            let start = start
                .as_deref()
                .ok_or_else(|| AppError::Config("Missing --start for breaks --add".into()))?;
            let end = end
                .as_deref()
                .ok_or_else(|| AppError::Config("Missing --end for breaks --add".into()))?;

            // Validate before storing: the engine would silently skip
            // unparseable rows, better to reject them at the door.
            if parse_time(start).is_none() {
                return Err(AppError::InvalidTime(start.to_string()));
            }
            if parse_time(end).is_none() {
                return Err(AppError::InvalidTime(end.to_string()));
            }

            let kind = match kind.as_deref() {
                Some(code) => BreakKind::from_code(code)
                    .ok_or_else(|| AppError::InvalidBreakKind(code.to_string()))?,
                None => BreakKind::Standard,
            };

            let id = insert_break_window(&pool.conn, label, start, end, kind)?;

            audit(
                &pool.conn,
                "breaks",
                &format!("id {}", id),
                &format!("Added break window '{}' {}-{}", label, start, end),
            )?;
            success(format!("Break window '{}' added (id {}).", label, id));
        }

        //
        // 2) ENABLE / DISABLE / DELETE
        //
        if let Some(id) = enable {
            set_break_window_active(&pool.conn, *id, true)?;
            audit(&pool.conn, "breaks", &format!("id {}", id), "Enabled")?;
            success(format!("Break window {} enabled.", id));
        }

        if let Some(id) = disable {
            set_break_window_active(&pool.conn, *id, false)?;
            audit(&pool.conn, "breaks", &format!("id {}", id), "Disabled")?;
            success(format!("Break window {} disabled.", id));
        }

        if let Some(id) = del {
            delete_break_window(&pool.conn, *id)?;
            audit(&pool.conn, "breaks", &format!("id {}", id), "Deleted")?;
            success(format!("Break window {} deleted.", id));
        }

        //
        // 3) LIST
        //
        if *list {
            let windows = load_break_windows(&mut pool, false)?;

            if windows.is_empty() {
                println!("No break windows configured.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("LABEL", 20),
                Column::new("START", 6),
                Column::new("END", 6),
                Column::new("KIND", 18),
                Column::new("ACTIVE", 6),
            ]);

            for w in &windows {
                table.add_row(vec![
                    w.id.to_string(),
                    w.label.clone(),
                    w.start_str(),
                    w.end_str(),
                    w.kind.to_db_str().to_string(),
                    if w.active { "yes" } else { "no" }.to_string(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
