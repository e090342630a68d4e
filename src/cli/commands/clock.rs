use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::breaks::subtract_break_overlap;
use crate::core::clock::parse_time;
use crate::core::normalize::normalize;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{list_active_break_windows, upsert_attendance};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date_arg;
use crate::utils::formatting::mins2readable;

/// Handle the `clock` command: record (or amend) a user's attendance stamps
/// and persist the recomputed work minutes.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        user,
        date,
        start,
        end,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        let mut pool = DbPool::new(&cfg.database)?;

        // Raw stamps are stored as given; malformed ones are kept but
        // flagged, the normalizer defaults them at report time.
        for raw in [start, end].into_iter().flatten() {
            if parse_time(raw).is_none() {
                warning(format!(
                    "'{}' is not a valid HH:MM time — it will be treated as absent.",
                    raw
                ));
            }
        }

        let shift_start = parse_time(&cfg.default_shift_start).unwrap_or(510);
        let shift_end = parse_time(&cfg.default_shift_end).unwrap_or(1050);

        let norm = normalize(start.as_deref(), end.as_deref(), shift_start, shift_end);

        let windows = list_active_break_windows(&mut pool)?;
        let work_minutes = subtract_break_overlap(norm.clock_in, norm.clock_out, &windows);

        upsert_attendance(
            &pool.conn,
            user,
            &date,
            start.as_deref(),
            end.as_deref(),
            work_minutes,
        )?;

        audit(
            &pool.conn,
            "clock",
            &format!("{} {}", user, date),
            &format!(
                "Attendance {}-{} → {} worked",
                norm.clock_in_str(),
                norm.clock_out_str(),
                mins2readable(work_minutes, false, false)
            ),
        )?;

        success(format!(
            "{} on {}: {} – {} ({} after breaks)",
            user,
            date,
            norm.clock_in_str(),
            norm.clock_out_str(),
            mins2readable(work_minutes, false, false)
        ));
    }

    Ok(())
}
