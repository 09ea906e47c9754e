//! `availability` CLI - compute shared free time from a JSON event file.
//!
//! ## Usage
//!
//! ```sh
//! # Free time for the requester (1) and participants 2 and 3
//! availability generate -e events.json --start 2026-03-02T09:00 --end 2026-03-02T17:00 \
//!     -r 1 -p 2,3
//!
//! # Same window given as a date and a time range
//! availability generate -e events.json --date 2026-03-02 --from 09:00 --to 17:00 -r 1 -p 2,3
//!
//! # Only slots of at least an hour, read and written in New York time
//! availability generate -e events.json --date 2026-03-02 --from 09:00 --to 17:00 -r 1 \
//!     --min-duration 60 --timezone America/New_York
//!
//! # Merged busy time instead of free time
//! availability busy -e events.json --start 2026-03-02T09:00 --end 2026-03-02T17:00 -r 1 -p 2
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use availability_engine::format::{
    format_free_slots, format_intervals, parse_window, parse_window_on_date,
};
use availability_engine::{
    AccountId, AvailabilityEngine, EngineConfig, FetchFailurePolicy, InMemoryEventStore,
    ParticipantSet, SharedAvailability, Window,
};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "availability",
    version,
    about = "Shared availability across participants' calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the free intervals shared by all participants
    Generate {
        #[command(flatten)]
        query: QueryArgs,
        /// Only keep free intervals lasting at least this many minutes
        #[arg(long)]
        min_duration: Option<i64>,
    },
    /// Print the merged busy intervals of all participants
    Busy {
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// JSON file with each account's events
    #[arg(short, long)]
    events: String,
    /// Window start (YYYY-MM-DDTHH:MM)
    #[arg(long, requires = "end", conflicts_with = "date")]
    start: Option<String>,
    /// Window end (YYYY-MM-DDTHH:MM)
    #[arg(long, requires = "start")]
    end: Option<String>,
    /// Window date (YYYY-MM-DD), used with --from and --to
    #[arg(long, requires_all = ["from", "to"])]
    date: Option<String>,
    /// Window start time on --date (HH:MM)
    #[arg(long, requires = "date")]
    from: Option<String>,
    /// Window end time on --date (HH:MM)
    #[arg(long, requires = "date")]
    to: Option<String>,
    /// Account id of the person asking; always a participant
    #[arg(short, long)]
    requester: AccountId,
    /// Comma-separated account ids of the other participants
    #[arg(short, long, default_value = "")]
    participants: String,
    /// IANA timezone for reading and printing times (overrides the config file)
    #[arg(long)]
    timezone: Option<String>,
    /// What to do when a participant's events cannot be read: fail, exclude, busy
    #[arg(long)]
    policy: Option<String>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Re-parse with --help to show usage (clap handles this)
            Cli::parse_from(["availability", "--help"]);
            unreachable!();
        }
    };

    match command {
        Commands::Generate {
            query,
            min_duration,
        } => {
            let (result, tz) = run_query(&query)?;
            let free: Vec<_> = result
                .free
                .into_iter()
                .filter(|slot| min_duration.is_none_or(|min| slot.lasts_at_least(min)))
                .collect();
            let json = serde_json::to_string_pretty(&format_free_slots(&free, tz))?;
            write_output(query.output.as_deref(), &json)?;
        }
        Commands::Busy { query } => {
            let (result, tz) = run_query(&query)?;
            let json = serde_json::to_string_pretty(&format_intervals(&result.busy, tz))?;
            write_output(query.output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Load configuration and events, then run one availability computation.
fn run_query(query: &QueryArgs) -> Result<(SharedAvailability, Tz)> {
    let config = load_config(query)?;
    let tz = config.tz()?;

    let events_json = std::fs::read_to_string(&query.events)
        .with_context(|| format!("Failed to read file: {}", query.events))?;
    let store = InMemoryEventStore::from_json(&events_json, tz)
        .with_context(|| format!("Failed to load events from {}", query.events))?;

    let window = resolve_window(query, tz)?;
    let participants = ParticipantSet::parse(&query.participants, query.requester)
        .context("Failed to parse participant list")?;

    let engine = AvailabilityEngine::with_config(store, config);
    info!(
        requester = query.requester,
        participants = participants.len(),
        timezone = %engine.config().timezone,
        policy = ?engine.config().fetch_failure_policy,
        "computing shared availability"
    );

    let result = engine
        .shared_availability(&window, &participants)
        .context("Failed to compute shared availability")?;
    Ok((result, tz))
}

/// Read the config file if given, then apply command-line overrides.
fn load_config(query: &QueryArgs) -> Result<EngineConfig> {
    let mut config = match query.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path))?;
            EngineConfig::from_toml_str(&raw)
                .with_context(|| format!("Invalid configuration in {}", path))?
        }
        None => EngineConfig::default(),
    };

    if let Some(tz) = &query.timezone {
        config.timezone = tz.clone();
    }
    if let Some(policy) = &query.policy {
        config.fetch_failure_policy = policy.parse::<FetchFailurePolicy>()?;
    }
    Ok(config)
}

fn resolve_window(query: &QueryArgs, tz: Tz) -> Result<Window> {
    let window = match (&query.start, &query.end, &query.date) {
        (Some(start), Some(end), _) => parse_window(start, end, tz)?,
        (_, _, Some(date)) => {
            let from = query.from.as_deref().unwrap_or_default();
            let to = query.to.as_deref().unwrap_or_default();
            parse_window_on_date(date, from, to, tz)?
        }
        _ => anyhow::bail!("Provide a window with --start/--end or --date/--from/--to"),
    };
    Ok(window)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
