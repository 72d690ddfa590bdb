// Command-line interface.

use std::path::PathBuf;

use benchcoach_core::insight::ActualPointsView;
use benchcoach_core::lineup::{Metric, Position};
use clap::{Args, Parser, Subcommand};

use crate::report::OutputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "benchcoach",
    version,
    about = "Weekly fantasy football lineup and free-agent insights"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the full weekly report.
    Report(ReportArgs),
    /// Print the optimal lineup and the swaps that reach it.
    Optimize(OptimizeArgs),
    /// Print the free-agent shortlist.
    FreeAgents(FreeAgentArgs),
}

impl Command {
    /// Explicit config path, if the subcommand was given one.
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Report(args) => args.source.config.as_ref(),
            Command::Optimize(args) => args.source.config.as_ref(),
            Command::FreeAgents(args) => args.source.config.as_ref(),
        }
    }
}

/// Input files shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Normalized week snapshot (JSON).
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// League settings file. Defaults to ./config/league.toml, then the user
    /// config directory, then built-in settings.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Free-agent shortlist options.
#[derive(Debug, Args, Clone)]
pub struct ShortlistArgs {
    /// Free-agent pool (CSV). Replaces the snapshot's free agents.
    #[arg(long)]
    pub free_agents: Option<PathBuf>,

    /// Only list these positions. Repeatable.
    #[arg(short, long = "position", value_parser = parse_position)]
    pub positions: Vec<Position>,

    /// How many free agents to list.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub shortlist: ShortlistArgs,

    /// Output format. Defaults to the config's `report.format`.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// When to include the actual-points view (auto, always, never).
    #[arg(long, value_parser = parse_actual_view)]
    pub actual: Option<ActualPointsView>,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Point value to optimize (projected, actual).
    #[arg(short, long, value_parser = parse_metric, default_value = "projected")]
    pub metric: Metric,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

#[derive(Debug, Args, Clone)]
pub struct FreeAgentArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub shortlist: ShortlistArgs,

    /// Point value to rank by (projected, actual).
    #[arg(short, long, value_parser = parse_metric, default_value = "projected")]
    pub metric: Metric,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

fn parse_position(s: &str) -> Result<Position, String> {
    Position::from_str_pos(s).ok_or_else(|| format!("unknown position `{s}` (QB, RB, WR, TE, K, DEF)"))
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    match s.trim().to_lowercase().as_str() {
        "projected" | "proj" => Ok(Metric::Projected),
        "actual" => Ok(Metric::Actual),
        _ => Err(format!("unknown metric `{s}` (projected, actual)")),
    }
}

fn parse_actual_view(s: &str) -> Result<ActualPointsView, String> {
    ActualPointsView::from_str_view(s)
        .ok_or_else(|| format!("unknown actual-points mode `{s}` (auto, always, never)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_flags() {
        let cli = Cli::try_parse_from([
            "benchcoach",
            "report",
            "--snapshot",
            "week.json",
            "-p",
            "qb",
            "--position",
            "K",
            "--count",
            "4",
            "--format",
            "json",
            "--actual",
            "always",
        ])
        .unwrap();

        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.source.snapshot, PathBuf::from("week.json"));
                assert_eq!(
                    args.shortlist.positions,
                    vec![Position::Quarterback, Position::Kicker]
                );
                assert_eq!(args.shortlist.count, Some(4));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert_eq!(args.actual, Some(ActualPointsView::Always));
                assert!(args.output.is_none());
            }
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn optimize_defaults_to_projected() {
        let cli = Cli::try_parse_from(["benchcoach", "optimize", "-s", "week.json"]).unwrap();
        match cli.command {
            Command::Optimize(args) => {
                assert_eq!(args.metric, Metric::Projected);
                assert_eq!(args.format, OutputFormat::Markdown);
            }
            other => panic!("expected optimize, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_position() {
        let err = Cli::try_parse_from([
            "benchcoach",
            "free-agents",
            "--snapshot",
            "week.json",
            "--position",
            "LB",
        ]);
        assert!(err.is_err());
    }
}
