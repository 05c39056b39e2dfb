use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::combat::{export_events_csv, play_match, CombatError, SeededDecisions, DEFAULT_SEED};
use crate::data::{
    load_pairings, load_rules_or_default, read_roster, validate_roster_file, LoadError,
    RulesError,
};
use crate::parallel::{run_sweep, SweepError, WorkerPool};

const DEFAULT_YOUR_ASSIGNMENTS: &str = "./samples/match_1/your_assignments";
const DEFAULT_OPPONENT_ASSIGNMENTS: &str = "./samples/match_1/opponent_assignments";

#[derive(Debug, Parser)]
#[command(name = "skirmish")]
#[command(about = "Play roster-vs-roster combat matches", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play one match and print its turn log
    Play(PlayArgs),

    /// Print every character of a roster file with its effective stats
    Inspect {
        file: PathBuf,
    },

    /// Check a roster file for unknown names and suspicious stats
    Validate {
        file: PathBuf,
    },

    /// Play the same match under many seeds and summarize win rates
    Sweep(SweepArgs),
}

#[derive(Debug, Args)]
pub struct MatchDirs {
    /// Directory of your roster files, one per round
    #[arg(long, alias = "your_assignments", default_value = DEFAULT_YOUR_ASSIGNMENTS)]
    pub your_assignments: PathBuf,

    /// Directory of the opponent's roster files, one per round
    #[arg(long, alias = "opponent_assignments", default_value = DEFAULT_OPPONENT_ASSIGNMENTS)]
    pub opponent_assignments: PathBuf,

    /// JSON file overriding the combat rules
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub dirs: MatchDirs,

    /// Write the log here instead of stdout
    #[arg(long, alias = "output_file")]
    pub output_file: Option<PathBuf>,

    #[arg(long, env = "SKIRMISH_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Emit the full match report as JSON instead of the text log
    #[arg(long)]
    pub json: bool,

    /// Also write one CSV row per turn to this path
    #[arg(long)]
    pub events_csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub dirs: MatchDirs,

    /// Number of seeds to play
    #[arg(long, default_value_t = 100)]
    pub seeds: u64,

    #[arg(long, env = "SKIRMISH_SEED", default_value_t = DEFAULT_SEED)]
    pub start_seed: u64,

    /// Worker threads; 0 uses every core
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write events CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Parse `args` (including the program name) and run the command.
/// Returns the process exit code: 0 success, 1 failure, 2 usage.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let result = match cli.command {
        Command::Play(play) => handle_play(&play),
        Command::Inspect { file } => handle_inspect(&file),
        Command::Validate { file } => handle_validate(&file),
        Command::Sweep(sweep) => handle_sweep(&sweep),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn handle_play(args: &PlayArgs) -> Result<i32, CliError> {
    let rules = load_rules_or_default(args.dirs.rules.as_deref())?;
    let pairings = load_pairings(
        &args.dirs.your_assignments,
        &args.dirs.opponent_assignments,
        &rules,
    )?;
    let mut decisions = SeededDecisions::new(args.seed);
    let report = play_match(pairings, &mut decisions, &rules)?;
    info!(
        seed = args.seed,
        won = report.won(),
        your_points = report.your_points,
        opponent_points = report.opponent_points,
        draws = decisions.draws(),
        "match finished"
    );

    if let Some(path) = &args.events_csv {
        export_events_csv(&report, path)?;
    }

    let output = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.log().join("\n")
    };

    match &args.output_file {
        Some(path) => write_output(path, &output)?,
        None => println!("{output}"),
    }
    Ok(0)
}

fn write_output(path: &Path, output: &str) -> Result<(), CliError> {
    fs::write(path, format!("{output}\n")).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn handle_inspect(file: &Path) -> Result<i32, CliError> {
    let roster = read_roster(file, &Default::default())?;
    for (index, character) in roster.characters.iter().enumerate() {
        println!("{}. {character}", index + 1);
    }
    Ok(0)
}

fn handle_validate(file: &Path) -> Result<i32, CliError> {
    let report = validate_roster_file(file)?;
    for diagnostic in &report.diagnostics {
        if report.has_errors() {
            eprintln!("- {diagnostic}");
        } else {
            println!("- {diagnostic}");
        }
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} issue(s)",
            report.diagnostics.len()
        );
        return Ok(1);
    }
    println!("validation passed: {}", file.display());
    Ok(0)
}

fn handle_sweep(args: &SweepArgs) -> Result<i32, CliError> {
    let rules = load_rules_or_default(args.dirs.rules.as_deref())?;
    let pairings = load_pairings(
        &args.dirs.your_assignments,
        &args.dirs.opponent_assignments,
        &rules,
    )?;
    let summary = run_sweep(
        &pairings,
        args.start_seed,
        args.seeds,
        &rules,
        &WorkerPool::with_workers(args.workers),
    )?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn play_defaults_follow_sample_layout() {
        let cli = Cli::try_parse_from(args(&["skirmish", "play"])).unwrap();
        let Command::Play(play) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(play.dirs.your_assignments, PathBuf::from(DEFAULT_YOUR_ASSIGNMENTS));
        assert!(play.output_file.is_none());
        assert!(!play.json);
    }

    #[test]
    fn underscore_aliases_are_accepted() {
        let cli = Cli::try_parse_from(args(&[
            "skirmish",
            "play",
            "--your_assignments",
            "a",
            "--opponent_assignments",
            "b",
            "--output_file",
            "out.txt",
            "--seed",
            "9",
        ]))
        .unwrap();
        let Command::Play(play) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(play.dirs.your_assignments, PathBuf::from("a"));
        assert_eq!(play.output_file, Some(PathBuf::from("out.txt")));
        assert_eq!(play.seed, 9);
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        assert_eq!(run_with_args(&args(&["skirmish", "dance"])), 2);
    }
}
