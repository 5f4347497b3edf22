mod commands;
mod espn;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::export::{ExportOptions, Selection};
use commands::Source;
use hoopcal_core::config::HoopcalConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hoopcal")]
#[command(about = "Follow your college basketball team: schedule, roster, predictions and calendar export")]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum League {
    Mens,
    Womens,
}

impl League {
    fn slug(self) -> &'static str {
        match self {
            League::Mens => "mens-college-basketball",
            League::Womens => "womens-college-basketball",
        }
    }
}

#[derive(Args)]
struct SourceArgs {
    /// Override the configured league
    #[arg(long, value_enum)]
    league: Option<League>,

    /// Read a saved ESPN response instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self, config: &HoopcalConfig) -> Source {
        Source {
            league: self
                .league
                .map(|l| l.slug().to_string())
                .unwrap_or_else(|| config.league.clone()),
            team_id: config.team_id,
            input: self.input,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schedule with scores and win predictions
    Schedule {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the roster with season averages
    Roster {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Save games as an .ics file (all games by default)
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Only export this game (ESPN event id)
        #[arg(long, conflicts_with = "next")]
        game: Option<String>,

        /// Only export the next upcoming game, with an alert
        #[arg(long)]
        next: bool,

        /// Add an alert this many minutes before tip-off
        #[arg(long)]
        alarm: Option<u32>,

        /// Where to write the file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open Google Calendar's import page afterwards
        #[arg(long)]
        open_import: bool,
    },
    /// Print "add to calendar" links for a game
    Links {
        /// ESPN event id
        game_id: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show config paths, or create a commented config file
    Config {
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Schedule { source, json } => {
            let config = HoopcalConfig::load()?;
            let tz = config.display_timezone()?;
            commands::schedule::run(source.into_source(&config), tz, config.default_alarm_minutes, json)
                .await
        }
        Commands::Roster { source } => {
            let config = HoopcalConfig::load()?;
            commands::roster::run(source.into_source(&config)).await
        }
        Commands::Export {
            source,
            game,
            next,
            alarm,
            output,
            open_import,
        } => {
            let config = HoopcalConfig::load()?;
            let selection = match (game, next) {
                (Some(id), _) => Selection::Game(id),
                (None, true) => Selection::Next,
                (None, false) => Selection::All,
            };
            let options = ExportOptions {
                selection,
                alarm_minutes: alarm,
                output,
                open_import,
            };
            commands::export::run(source.into_source(&config), &config, options).await
        }
        Commands::Links { game_id, source } => {
            let config = HoopcalConfig::load()?;
            let builder = config.calendar_builder();
            commands::links::run(source.into_source(&config), &builder, &game_id).await
        }
        Commands::Config { init } => commands::config::run(init),
    }
}
