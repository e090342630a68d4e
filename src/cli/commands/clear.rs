use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::insert_anomaly_clear;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;

/// Handle the `clear` command: record that a human reviewed and dismissed a
/// flagged discrepancy. The reconciliation engine itself never reads this
/// marker; only the report listings skip cleared days.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { user, date, by } = cmd {
        let date = parse_date_arg(date)?;
        let pool = DbPool::new(&cfg.database)?;

        insert_anomaly_clear(&pool.conn, user, &date, by)?;

        audit(
            &pool.conn,
            "clear",
            &format!("{} {}", user, date),
            &format!("Anomaly cleared by {}", by),
        )?;

        success(format!("Anomaly for {} on {} cleared by {}.", user, date, by));
    }

    Ok(())
}
