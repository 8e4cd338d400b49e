mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::achievement::AchievementArgs;
use commands::aggregate::AggregateArgs;
use commands::classify::ClassifyArgs;
use commands::period::PeriodArgs;
use commands::score::ScoreArgs;

/// OKR scorecard computation
#[derive(Parser)]
#[command(
    name = "okr",
    version,
    about = "OKR progress aggregation and scorecard rollup",
    long_about = "A CLI for the OKR progress-aggregation engine with decimal precision. \
                  Resolves period windows, aggregates monthly target/actual series, \
                  computes directional achievement percentages, and rolls scores up \
                  through objectives and pillars into a company scorecard."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full company scorecard for a period
    Score(ScoreArgs),
    /// Achievement percentage for one (target, actual) pair
    Achievement(AchievementArgs),
    /// Aggregate a monthly value series
    Aggregate(AggregateArgs),
    /// Resolve a period selection into its month keys
    ResolvePeriod(PeriodArgs),
    /// Classify a percentage into its performance band
    Classify(ClassifyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Score(args) => commands::score::run_score(args),
        Commands::Achievement(args) => commands::achievement::run_achievement(args),
        Commands::Aggregate(args) => commands::aggregate::run_aggregate(args),
        Commands::ResolvePeriod(args) => commands::period::run_resolve_period(args),
        Commands::Classify(args) => commands::classify::run_classify(args),
        Commands::Version => {
            println!("okr {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
