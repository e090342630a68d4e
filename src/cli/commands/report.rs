use chrono::NaiveDate;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{business_days_ago, civil_now};
use crate::core::clock::{DAY_MIN, format_time, parse_time};
use crate::core::reconcile::ReportPolicy;
use crate::core::report::{DayDefaults, DayInputs, reconcile_day};
use crate::db::pool::DbPool;
use crate::db::queries::{
    is_cleared, list_active_break_windows, list_users_for_date, load_attendance,
    load_sessions_for_date,
};
use crate::errors::AppResult;
use crate::models::break_window::BreakWindow;
use crate::models::day_report::DayReport;
use crate::ui::messages::{flagged, info};
use crate::utils::colors::{RESET, color_for_difference};
use crate::utils::date::parse_date_arg;
use crate::utils::formatting::mins2readable;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        over,
        under,
        days,
        threshold,
        json,
        user,
        date,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let defaults = DayDefaults {
            shift_start: parse_time(&cfg.default_shift_start).unwrap_or(510),
            shift_end: parse_time(&cfg.default_shift_end).unwrap_or(1050),
            merge_tolerance: cfg.merge_tolerance_min,
        };
        let threshold = threshold.unwrap_or(cfg.flag_threshold_min);

        // One break-window snapshot for the whole run, so every day is
        // reconciled against the same table.
        let windows = list_active_break_windows(&mut pool)?;
        let now = civil_now();

        //
        // 1) DETAIL VIEW — one user, one date
        //
        if let (Some(user), Some(date)) = (user, date) {
            let date = parse_date_arg(date)?;

            // The detail comparison excludes early-arrival logging: session
            // starts before the canonical shift start are clamped up to it.
            let policy = ReportPolicy {
                pre_clamp: Some(defaults.shift_start),
                ..ReportPolicy::over_logged(threshold)
            };

            let report = build_report(&mut pool, user, date, &windows, &defaults, &policy, now)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_detail(&report);
            }
            return Ok(());
        }

        if user.is_some() != date.is_some() {
            return Err(crate::errors::AppError::Config(
                "--user and --date must be given together for the detail view".into(),
            ));
        }

        //
        // 2) BATCH LISTINGS — over-logged and/or under-logged
        //
        let lookback = days.unwrap_or(cfg.lookback_days);
        let dates = business_days_ago(lookback);

        // with no direction given, run both listings
        let (run_over, run_under) = if !*over && !*under {
            (true, true)
        } else {
            (*over, *under)
        };

        let mut results: Vec<DayReport> = Vec::new();

        for d in &dates {
            for u in list_users_for_date(&mut pool, d)? {
                // Human-dismissed anomalies stay out of the listings.
                if is_cleared(&mut pool, &u, d)? {
                    continue;
                }

                if run_over {
                    let policy = ReportPolicy::over_logged(threshold);
                    let r = build_report(&mut pool, &u, *d, &windows, &defaults, &policy, now)?;
                    if r.discrepancy.flagged {
                        results.push(r);
                    }
                }

                if run_under {
                    let policy = ReportPolicy::under_logged(threshold);
                    let r = build_report(&mut pool, &u, *d, &windows, &defaults, &policy, now)?;
                    if r.discrepancy.flagged {
                        results.push(r);
                    }
                }
            }
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else if results.is_empty() {
            info(format!(
                "No discrepancies above {} min in the last {} business days.",
                threshold, lookback
            ));
        } else {
            print_listing(&results);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_report(
    pool: &mut DbPool,
    user: &str,
    date: NaiveDate,
    windows: &[BreakWindow],
    defaults: &DayDefaults,
    policy: &ReportPolicy,
    now: chrono::NaiveDateTime,
) -> AppResult<DayReport> {
    let attendance = load_attendance(pool, user, &date)?;
    let sessions = load_sessions_for_date(pool, user, &date)?;

    let inputs = DayInputs {
        user,
        date,
        attendance: attendance.as_ref(),
        sessions: &sessions,
        windows,
        now,
    };

    Ok(reconcile_day(&inputs, defaults, policy))
}

fn print_listing(results: &[DayReport]) {
    let mut table = Table::new(vec![
        Column::new("DATE", 10),
        Column::new("USER", 12),
        Column::new("ATTEND", 8),
        Column::new("LOGGED", 8),
        Column::new("DIFF", 8),
    ]);

    for r in results {
        table.add_row(vec![
            r.date.to_string(),
            r.user.clone(),
            mins2readable(r.discrepancy.attendance_minutes, false, true),
            mins2readable(r.discrepancy.logged_minutes, false, true),
            format!(
                "{}{}{}",
                color_for_difference(r.discrepancy.difference_minutes),
                mins2readable(r.discrepancy.difference_minutes, true, true),
                RESET
            ),
        ]);
    }

    flagged(format!("{} flagged day(s):", results.len()));
    println!();
    print!("{}", table.render());
}

fn print_detail(r: &DayReport) {
    println!("\n=== {} — {} ===", r.user, r.date);
    println!("Attendance: {} – {}", r.clock_in, r.clock_out);

    if r.busy.is_empty() {
        println!("Sessions:   none");
    } else {
        println!("Sessions:");
        for iv in &r.busy {
            println!(
                "  - {} – {}",
                format_time(iv.start),
                // ends past midnight spill into the next day
                if iv.end >= DAY_MIN {
                    format!("{} (+1d)", format_time(iv.end - DAY_MIN))
                } else {
                    format_time(iv.end)
                }
            );
        }
    }

    println!(
        "Worked: {} | Logged: {} | Diff: {}{}{}",
        mins2readable(r.discrepancy.attendance_minutes, false, false),
        mins2readable(r.discrepancy.logged_minutes, false, false),
        color_for_difference(r.discrepancy.difference_minutes),
        mins2readable(r.discrepancy.difference_minutes, true, false),
        RESET
    );

    if r.discrepancy.flagged {
        flagged("Discrepancy above threshold.");
    }
}
