use clap::{Parser, Subcommand};

/// Command-line interface definition for shoptally
/// CLI application to track attendance and reconcile logged work with SQLite
#[derive(Parser)]
#[command(
    name = "shoptally",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track shop attendance and reconcile it against logged task sessions using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or validate)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Administer the global break-window table
    Breaks {
        #[arg(long = "add", help = "Add a new break window")]
        add: bool,

        #[arg(long = "label", help = "Break window label (used with --add)")]
        label: Option<String>,

        /// Window start (HH:MM)
        #[arg(long = "start", help = "Window start time (HH:MM)")]
        start: Option<String>,

        /// Window end (HH:MM); an end before the start wraps past midnight
        #[arg(long = "end", help = "Window end time (HH:MM)")]
        end: Option<String>,

        #[arg(
            long = "kind",
            help = "Window kind: standard (subtracted) or pre-shift-exempt (clamps early starts)"
        )]
        kind: Option<String>,

        #[arg(long = "list", help = "List all break windows")]
        list: bool,

        #[arg(long = "enable", value_name = "ID", help = "Re-enable a break window")]
        enable: Option<i64>,

        #[arg(long = "disable", value_name = "ID", help = "Disable a break window")]
        disable: Option<i64>,

        #[arg(long = "del", value_name = "ID", help = "Delete a break window")]
        del: Option<i64>,
    },

    /// Record attendance stamps for a user and date
    Clock {
        /// User identifier
        user: String,

        /// Business date (YYYY-MM-DD)
        date: String,

        /// Clock-in time (HH:MM)
        #[arg(long = "in", help = "Clock-in time (HH:MM)")]
        start: Option<String>,

        /// Clock-out time (HH:MM)
        #[arg(long = "out", help = "Clock-out time (HH:MM)")]
        end: Option<String>,
    },

    /// Manage task work-sessions
    Session {
        /// User identifier
        user: String,

        #[arg(long = "task", help = "Task name the session is logged against")]
        task: Option<String>,

        /// Session start (YYYY-MM-DD HH:MM)
        #[arg(long = "start", help = "Session start (YYYY-MM-DD HH:MM)")]
        start: Option<String>,

        /// Session end (YYYY-MM-DD HH:MM); omit to leave the session open
        #[arg(long = "end", help = "Session end (YYYY-MM-DD HH:MM)")]
        end: Option<String>,

        #[arg(long = "stop", help = "Close the most recent open session now")]
        stop: bool,

        #[arg(long = "list", help = "List sessions for a date")]
        list: bool,

        #[arg(long = "date", help = "Date filter for --list (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Reconciliation reports: attendance vs logged session time
    Report {
        #[arg(long = "over", help = "List days where logged time far exceeds attendance")]
        over: bool,

        #[arg(long = "under", help = "List days where attendance far exceeds logged time")]
        under: bool,

        #[arg(long = "days", help = "Business-day lookback (default from config)")]
        days: Option<usize>,

        #[arg(
            long = "threshold",
            help = "Flag threshold in minutes (default from config)"
        )]
        threshold: Option<i64>,

        #[arg(long = "json", help = "Emit the report as JSON")]
        json: bool,

        #[arg(long = "user", help = "Detail view: user identifier")]
        user: Option<String>,

        #[arg(long = "date", help = "Detail view: business date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Dismiss a flagged discrepancy for a user and date
    Clear {
        /// User identifier
        user: String,

        /// Business date (YYYY-MM-DD)
        date: String,

        #[arg(long = "by", help = "Name of the person clearing the anomaly")]
        by: String,
    },
}
