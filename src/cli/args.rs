use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "pomoguard")]
#[command(about = "Track pomodoro sessions, website time and per-site limits")]
#[command(long_about = "pomoguard - pomodoro and website time tracking

Records work/break timer sessions, completed cycles, website visits and
per-site daily limits in a local SQLite database.

QUICK START:
  pomoguard session start work        Start a 25-minute work session
  pomoguard session complete 1        Complete session 1
  pomoguard visit start example.com   Start tracking a site visit
  pomoguard limit set example.com 30  Allow 30 minutes per day
  pomoguard stats weekly              Show the last week of stats

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Database file (defaults to ~/.pomoguard/pomoguard.db)
    #[arg(long, env = "POMOGUARD_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.pomoguard/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work and break timer sessions
    ///
    /// # Examples
    ///
    ///   pomoguard session start work --minutes 50 --preset deep
    ///   pomoguard session complete 3
    ///   pomoguard session show 3
    #[command(alias = "s")]
    Session(SessionArgs),

    /// Pair a work session with its break
    ///
    /// # Examples
    ///
    ///   pomoguard cycle record 3 --break-id 4
    Cycle(CycleArgs),

    /// Website visit tracking
    ///
    /// # Examples
    ///
    ///   pomoguard visit start news.example
    ///   pomoguard visit end 12
    ///   pomoguard visit blocked social.example
    #[command(alias = "v")]
    Visit(VisitArgs),

    /// Per-site daily time limits
    ///
    /// # Examples
    ///
    ///   pomoguard limit set example.com 30
    ///   pomoguard limit list
    Limit(LimitArgs),

    /// Daily, weekly and per-site statistics
    ///
    /// # Examples
    ///
    ///   pomoguard stats daily --date yesterday
    ///   pomoguard stats weekly
    ///   pomoguard stats site example.com
    Stats(StatsArgs),

    /// Write a full copy of the database to a file
    ///
    /// # Examples
    ///
    ///   pomoguard export backup.db
    Export {
        /// Destination file
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

/// Timer session subcommands.
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a timer session now
    Start {
        /// Session kind: work or break
        kind: String,

        /// Planned length in minutes (25 for work, 5 for break by default)
        #[arg(long, short = 'm')]
        minutes: Option<i64>,

        /// Preset the session was started from
        #[arg(long, short = 'p', default_value = "default")]
        preset: String,
    },

    /// Mark a running session completed
    Complete {
        /// Session ID
        id: i64,
    },

    /// Show one session
    Show {
        /// Session ID
        id: i64,
    },
}

#[derive(Args)]
pub struct CycleArgs {
    #[command(subcommand)]
    pub command: CycleCommands,
}

/// Cycle subcommands.
#[derive(Subcommand)]
pub enum CycleCommands {
    /// Record a completed work/break cycle
    Record {
        /// Work session ID
        work_id: i64,

        /// Break session ID
        #[arg(long)]
        break_id: Option<i64>,
    },
}

#[derive(Args)]
pub struct VisitArgs {
    #[command(subcommand)]
    pub command: VisitCommands,
}

/// Site visit subcommands.
#[derive(Subcommand)]
pub enum VisitCommands {
    /// Start a visit to a site now
    Start {
        /// Site URL or host
        url: String,
    },

    /// End an open visit now
    End {
        /// Visit ID
        id: i64,
    },

    /// Record a blocked attempt to open a site
    Blocked {
        /// Site URL or host
        url: String,
    },
}

#[derive(Args)]
pub struct LimitArgs {
    #[command(subcommand)]
    pub command: LimitCommands,
}

/// Site limit subcommands.
#[derive(Subcommand)]
pub enum LimitCommands {
    /// Set (or replace) a site's daily limit
    Set {
        /// Site URL or host
        url: String,

        /// Allowed minutes per day
        minutes: i64,
    },

    /// Show one site's limit and today's usage
    Show {
        /// Site URL or host
        url: String,
    },

    /// List all limits
    List,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommands,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Stats for one day
    Daily {
        /// Day: today, yesterday, "3 days ago" or YYYY-MM-DD
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Stats for the trailing week
    Weekly,

    /// Visit totals for one site on one day
    Site {
        /// Site URL or host
        url: String,

        /// Day: today, yesterday, "3 days ago" or YYYY-MM-DD
        #[arg(long, short = 'd')]
        date: Option<String>,
    },
}
