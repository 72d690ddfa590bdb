// Subcommand execution. Each command returns the rendered output; the binary
// decides where it goes.

use anyhow::Context;
use benchcoach_core::insight::{
    assemble, optimize_roster, rank_free_agents, score_efficiency, EfficiencyReport,
    InsightRequest, OptimizationResult,
};
use benchcoach_core::lineup::{Metric, Player, Position};
use benchcoach_core::snapshot::WeekParts;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{FreeAgentArgs, OptimizeArgs, ReportArgs, ShortlistArgs, SourceArgs};
use crate::config::Config;
use crate::loader;
use crate::report::{self, OutputFormat};

/// Load the snapshot, pad the lineup to the league's required slots, and
/// swap in a CSV free-agent pool when one was given.
fn load_parts(
    source: &SourceArgs,
    shortlist: Option<&ShortlistArgs>,
    config: &Config,
) -> anyhow::Result<WeekParts> {
    let snapshot = loader::load_snapshot(&source.snapshot)?;
    let mut parts = snapshot
        .into_parts()
        .with_context(|| format!("invalid snapshot {}", source.snapshot.display()))?;

    parts.roster = parts
        .roster
        .with_required_slots(&config.league.lineup)
        .context("league lineup settings are invalid")?;

    if parts.roster.slot_count() > config.league.starting_slots() {
        warn!(
            snapshot_slots = parts.roster.slot_count(),
            league_slots = config.league.starting_slots(),
            "snapshot has more starting slots than the league settings"
        );
    }

    if let Some(path) = shortlist.and_then(|s| s.free_agents.as_ref()) {
        parts.free_agents = loader::load_free_agents(path)?;
    }

    Ok(parts)
}

fn shortlist_positions<'a>(shortlist: &'a ShortlistArgs, config: &'a Config) -> Option<&'a [Position]> {
    let positions = if shortlist.positions.is_empty() {
        &config.report.free_agent_positions
    } else {
        &shortlist.positions
    };
    (!positions.is_empty()).then_some(positions.as_slice())
}

fn render<T: Serialize>(
    format: OutputFormat,
    body: &T,
    markdown: impl FnOnce() -> String,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown()),
        OutputFormat::Json => {
            report::render_json(body, Utc::now()).context("failed to serialize report")
        }
    }
}

/// `benchcoach report`
pub fn run_report(args: &ReportArgs, config: &Config) -> anyhow::Result<String> {
    let parts = load_parts(&args.source, Some(&args.shortlist), config)?;

    let request = InsightRequest {
        week: parts.week,
        team_name: &parts.team_name,
        roster: &parts.roster,
        free_agents: &parts.free_agents,
        free_agent_positions: shortlist_positions(&args.shortlist, config),
        free_agent_count: args.shortlist.count.unwrap_or(config.report.free_agent_count),
        matchup: parts.matchup.as_ref(),
        actual_view: args.actual.unwrap_or(config.report.actual_points),
    };
    let insights = assemble(&request).context("failed to build weekly insights")?;

    info!(
        team = %insights.team_name,
        gap = insights.projected.gap,
        swaps = insights.projected.swaps.len(),
        "report built"
    );

    let format = args.format.unwrap_or(config.report.format);
    render(format, &insights, || report::render_markdown(&insights))
}

#[derive(Serialize)]
struct OptimizeOutput<'a> {
    lineup: &'a OptimizationResult,
    efficiency: &'a EfficiencyReport,
}

/// `benchcoach optimize`
pub fn run_optimize(args: &OptimizeArgs, config: &Config) -> anyhow::Result<String> {
    let parts = load_parts(&args.source, None, config)?;
    let result = optimize_roster(&parts.roster, args.metric).context("failed to optimize lineup")?;
    let efficiency = score_efficiency(&parts.roster, &result);

    info!(metric = %args.metric, total = result.total, gap = efficiency.gap, "lineup optimized");

    let body = OptimizeOutput {
        lineup: &result,
        efficiency: &efficiency,
    };
    render(args.format, &body, || {
        report::render_optimal_lineup(&result, &efficiency)
    })
}

#[derive(Serialize)]
struct FreeAgentOutput<'a> {
    metric: Metric,
    free_agents: Vec<&'a Player>,
}

/// `benchcoach free-agents`
pub fn run_free_agents(args: &FreeAgentArgs, config: &Config) -> anyhow::Result<String> {
    let parts = load_parts(&args.source, Some(&args.shortlist), config)?;

    for fa in &parts.free_agents {
        if parts.roster.contains_player(&fa.id) {
            anyhow::bail!("free agent `{}` is already on the roster", fa.id);
        }
    }

    let count = args.shortlist.count.unwrap_or(config.report.free_agent_count);
    let ranked = rank_free_agents(
        &parts.free_agents,
        shortlist_positions(&args.shortlist, config),
        count,
        args.metric,
    );

    info!(pool = parts.free_agents.len(), listed = ranked.len(), "free agents ranked");

    let markdown = report::render_free_agents(&ranked, args.metric);
    let body = FreeAgentOutput {
        metric: args.metric,
        free_agents: ranked,
    };
    render(args.format, &body, || markdown)
}
