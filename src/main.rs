//! Command line entry point for pickup-teams
//!
//! Reads a JSON file of match rows, optionally narrowed to a roster, then
//! prints the leaderboard, the year options, the match history or a balanced
//! pair of teams for a selection of players.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use pickup_teams::config::AppConfig;
use pickup_teams::selection::parse_estimate;
use pickup_teams::stats::{
    filter_by_roster, forward_fill_dates, group_by_date, max_matches_played, min_matches_options,
    smart_min_matches_default,
};
use pickup_teams::types::{BalanceResult, MatchOutcome, RawMatchRow, Team};
use pickup_teams::utils::{format_form, format_percentage, round2};
use pickup_teams::{Selection, TeamService};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pickup Teams - balanced teams for recurring pick-up matches
#[derive(Parser)]
#[command(
    name = "pickup-teams",
    version,
    about = "Player rating and two-team balancing for pick-up matches",
    long_about = "Pickup Teams aggregates recorded match results into player statistics, \
                 rates players from overall, current-year and recent-form signals, and splits \
                 a selection into two even teams with goalkeeper seeding."
)]
struct Args {
    /// Match file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to the match file (JSON array of {date, winner, loser} rows)"
    )]
    matches: Option<PathBuf>,

    /// Roster file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Only keep matches involving a player from this JSON array of names"
    )]
    roster: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rank players by win percentage
    Leaderboard {
        /// Only count matches from this year
        #[arg(long, conflicts_with = "all_years")]
        year: Option<i32>,

        /// Count matches from every year
        #[arg(long)]
        all_years: bool,

        /// Hide players with fewer matches (defaults to half the top count)
        #[arg(long, value_name = "N")]
        min_matches: Option<u32>,
    },

    /// Show which years are offered as the current-year view
    Years,

    /// List matches grouped by day, newest first
    History {
        /// Only show the most recent days
        #[arg(long, value_name = "N")]
        days: Option<usize>,
    },

    /// Split the selected players into two balanced teams
    Teams {
        /// Selected player (repeatable)
        #[arg(short, long = "player", value_name = "NAME")]
        players: Vec<String>,

        /// Selected player who plays in goal (repeatable, at most two)
        #[arg(short, long = "goalkeeper", value_name = "NAME")]
        goalkeepers: Vec<String>,

        /// Guest with an estimated win percentage (repeatable)
        #[arg(long = "guest", value_name = "NAME=PCT")]
        guests: Vec<String>,

        /// Year used for the current-year signal
        #[arg(long)]
        year: Option<i32>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

/// Read match rows from a JSON file and normalize them into outcomes
fn load_outcomes(path: &Path) -> Result<Vec<MatchOutcome>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match file {}", path.display()))?;
    let rows: Vec<RawMatchRow> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid match file {}", path.display()))?;

    let outcomes = forward_fill_dates(&rows)?;
    info!(
        "Loaded {} matches from {}",
        outcomes.len(),
        path.display()
    );
    Ok(outcomes)
}

/// Read a roster of valid player names from a JSON array
fn load_roster(path: &Path) -> Result<HashSet<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file {}", path.display()))?;
    let names: Vec<String> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid roster file {}", path.display()))?;

    Ok(names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// Split a `NAME=PCT` guest argument
fn parse_guest(raw: &str) -> Result<(String, f64)> {
    let (name, estimate) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Guest must be given as NAME=PCT, got '{}'", raw))?;
    let name = name.trim();
    Ok((name.to_string(), parse_estimate(name, estimate)?))
}

fn print_leaderboard(
    service: &TeamService,
    outcomes: &[MatchOutcome],
    year: Option<i32>,
    min_matches: Option<u32>,
) {
    let max_matches = max_matches_played(outcomes, year);
    let min_matches = min_matches.unwrap_or_else(|| smart_min_matches_default(max_matches));
    let rows = service.leaderboard(outcomes, year, min_matches);

    match year {
        Some(year) => println!("Leaderboard {} (min {} matches)", year, min_matches),
        None => println!("Leaderboard, all years (min {} matches)", min_matches),
    }
    let choices: Vec<String> = min_matches_options(max_matches)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Minimum matches choices: {}", choices.join(", "));
    for row in rows {
        println!(
            "{:>3}. {:<20} {:>3}/{:<3} {:>7}  {}",
            row.position,
            row.name,
            row.wins,
            row.total,
            format_percentage(row.percentage),
            format_form(&row.recent_form)
        );
    }
}

fn print_history(outcomes: &[MatchOutcome], days: Option<usize>) {
    let grouped = group_by_date(outcomes);
    let shown = days.unwrap_or(grouped.len());

    for day in grouped.iter().take(shown) {
        match day.date {
            Some(date) => println!("{} ({} matches)", date.format("%d/%m/%Y"), day.matches.len()),
            None => println!("Undated ({} matches)", day.matches.len()),
        }
        for outcome in &day.matches {
            println!("  {} beat {}", outcome.winner, outcome.loser);
        }
    }
}

fn print_team(label: &str, team: &Team) {
    println!("{} (total {})", label, round2(team.total()));
    for player in &team.players {
        let mut tags = Vec::new();
        if player.is_goalkeeper {
            tags.push("GK");
        }
        if player.is_guest {
            tags.push("guest");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        println!("  {:<20} {:>6}{}", player.name, round2(player.score), tags);
    }
}

fn print_teams(result: &BalanceResult) {
    print_team("Team 1", &result.team1);
    print_team("Team 2", &result.team2);
    println!(
        "Difference: {} ({})",
        round2(result.difference),
        result.quality
    );
}

fn build_selection(
    service: &TeamService,
    outcomes: &[MatchOutcome],
    players: &[String],
    goalkeepers: &[String],
    guests: &[String],
    year: Option<i32>,
) -> Result<Selection> {
    let stats = service.statistics(outcomes, year);
    let mut selection = Selection::new();

    for raw in guests {
        let (name, estimate) = parse_guest(raw)?;
        selection.add_guest(&name, estimate, &stats)?;
    }
    for name in players.iter().chain(goalkeepers) {
        selection.select(name, &stats)?;
    }
    for name in goalkeepers {
        selection.set_goalkeeper(name, true)?;
    }

    debug!(
        "Selection: {} players, {} goalkeepers, {} guests",
        selection.len(),
        selection.goalkeepers().len(),
        selection.guests().len()
    );
    Ok(selection)
}

fn run(args: &Args, service: &TeamService, command: &Command) -> Result<()> {
    let path = args
        .matches
        .as_deref()
        .ok_or_else(|| anyhow!("--matches is required for this command"))?;
    let mut outcomes = load_outcomes(path)?;

    if let Some(roster_path) = &args.roster {
        let roster = load_roster(roster_path)?;
        outcomes = filter_by_roster(&outcomes, &roster);
        info!(
            "Kept {} matches involving the {} rostered players",
            outcomes.len(),
            roster.len()
        );
    }

    match command {
        Command::Leaderboard {
            year,
            all_years,
            min_matches,
        } => {
            let year = if *all_years {
                None
            } else {
                service.resolve_year(&outcomes, *year)
            };
            print_leaderboard(service, &outcomes, year, *min_matches);
        }
        Command::Years => {
            let options = service.year_options(&outcomes);
            if options.offered.is_empty() {
                println!("No dated matches");
            }
            for year in &options.offered {
                let marker = if Some(*year) == options.default_year {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}", year, marker);
            }
        }
        Command::History { days } => print_history(&outcomes, *days),
        Command::Teams {
            players,
            goalkeepers,
            guests,
            year,
        } => {
            let selection =
                build_selection(service, &outcomes, players, goalkeepers, guests, *year)?;
            let result = service.generate_teams(&outcomes, &selection, *year)?;
            print_teams(&result);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let service = TeamService::new(config)?;

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting");
        return Ok(());
    }

    match &args.command {
        Some(command) => run(&args, &service, command),
        None => Err(anyhow!(
            "No command given; use leaderboard, years, history or teams (see --help)"
        )),
    }
}
