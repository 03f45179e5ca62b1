use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use roam_budget::{TripSetOverview, aggregate_with};
use roam_core::{
    DerivedStatus, TripQuery, TripSort, build_day_timeline, build_timeline, month_grid,
    query_trips,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod config;
mod report;
mod state;

use config::{Config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "roam",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ROAM_BUILD_SHA"), ")"),
    about = "Trip timelines, calendars and budgets from travel API exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Input shared by every command that reads a trip export.
#[derive(Args, Debug)]
struct InputArgs {
    /// JSON export: a bare array or an envelope object
    #[arg(long, short)]
    input: PathBuf,

    /// Reference instant (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    now: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Selects a single trip out of the export.
#[derive(Args, Debug)]
struct TripArgs {
    /// Trip id (defaults to the first trip)
    #[arg(long)]
    trip: Option<String>,

    /// Separately fetched stops for the trip
    #[arg(long)]
    stops: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List trips with their lifecycle status
    Trips {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Case-insensitive match on title or destination
        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_enum, default_value_t = SortArg::Input)]
        sort: SortArg,
    },

    /// Cost breakdown of one trip
    Budget {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        trip: TripArgs,
    },

    /// Stops in chronological order, or one entry per day with --by-day
    Timeline {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        trip: TripArgs,

        #[arg(long)]
        by_day: bool,
    },

    /// Month grid with trip days and activity counts
    Calendar {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        trip: TripArgs,

        /// YYYY-MM (defaults to the trip's first month)
        #[arg(long)]
        month: Option<String>,

        /// YYYY-MM-DD to highlight
        #[arg(long)]
        selected: Option<String>,
    },

    /// Totals across every trip in the export
    Overview {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Manage ~/.roam/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Upcoming,
    Ongoing,
    Completed,
}

impl From<StatusArg> for DerivedStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Upcoming => DerivedStatus::Upcoming,
            StatusArg::Ongoing => DerivedStatus::Ongoing,
            StatusArg::Completed => DerivedStatus::Completed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    Input,
    Title,
    StartDate,
    Budget,
}

impl From<SortArg> for TripSort {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Input => TripSort::Input,
            SortArg::Title => TripSort::Title,
            SortArg::StartDate => TripSort::StartDate,
            SortArg::Budget => TripSort::Budget,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config()?;
    init_logging(&cfg);

    match cli.command {
        Command::Trips {
            input,
            status,
            search,
            sort,
        } => {
            let now = state::parse_now(input.now.as_deref())?;
            let trips = state::load_trips(&input.input, &cfg.ingest)?;
            let mut query = TripQuery::default().with_sort(sort.into());
            if let Some(status) = status {
                query = query.with_status(status.into());
            }
            if let Some(search) = search {
                query = query.with_search(search);
            }
            let matched = query_trips(&trips, &query, now);
            if input.json {
                print_json(&matched)?;
            } else {
                report::print_trips(&matched, now);
            }
        }

        Command::Budget { input, trip } => {
            let trip = load_one(&input.input, &trip, &cfg)?;
            let summary = aggregate_with(&trip, &cfg.budget)
                .with_context(|| format!("aggregating trip {}", trip.id))?;
            if input.json {
                print_json(&summary)?;
            } else {
                report::print_budget(&trip, &summary);
            }
        }

        Command::Timeline {
            input,
            trip,
            by_day,
        } => {
            let trip = load_one(&input.input, &trip, &cfg)?;
            if by_day {
                let timeline = build_day_timeline(&trip)
                    .with_context(|| format!("building day timeline for {}", trip.id))?;
                if input.json {
                    print_json(&timeline)?;
                } else {
                    report::print_day_timeline(&trip, &timeline);
                }
            } else {
                let timeline = build_timeline(&trip)
                    .with_context(|| format!("building timeline for {}", trip.id))?;
                if input.json {
                    print_json(&timeline)?;
                } else {
                    report::print_timeline(&trip, &timeline);
                }
            }
        }

        Command::Calendar {
            input,
            trip,
            month,
            selected,
        } => {
            let trip = load_one(&input.input, &trip, &cfg)?;
            let (year, month) = state::parse_month(month.as_deref(), &trip)?;
            let selected = selected.as_deref().map(state::parse_day).transpose()?;
            let tiles = month_grid(&trip, year, month, selected);
            if input.json {
                print_json(&tiles)?;
            } else {
                report::print_calendar(year, month, &tiles);
            }
        }

        Command::Overview { input } => {
            let now = state::parse_now(input.now.as_deref())?;
            let trips = state::load_trips(&input.input, &cfg.ingest)?;
            let overview = TripSetOverview::compute_with(&trips, now, &cfg.budget);
            if input.json {
                print_json(&overview)?;
            } else {
                report::print_overview(&overview);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn load_one(input: &Path, args: &TripArgs, cfg: &Config) -> Result<roam_core::CanonicalTrip> {
    let trips = state::load_trips(input, &cfg.ingest)?;
    state::select_trip(trips, args.trip.as_deref(), args.stops.as_deref())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}

/// `RUST_LOG` wins over the config filter. Logs go to stderr so `--json`
/// output stays clean.
fn init_logging(cfg: &Config) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
