// Report rendering: Markdown for humans, JSON for scripts.

use benchcoach_core::insight::{
    EfficiencyReport, MatchupSummary, OptimizationResult, WeeklyInsights,
};
use benchcoach_core::lineup::{DeployedSlot, Metric, Player};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output encoding for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonEnvelope<'a, T: Serialize> {
    generated_at: String,
    #[serde(flatten)]
    body: &'a T,
}

/// Pretty JSON with a `generated_at` timestamp alongside the body's fields.
pub fn render_json<T: Serialize>(
    body: &T,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let envelope = JsonEnvelope {
        generated_at: generated_at.to_rfc3339(),
        body,
    };
    let mut out = serde_json::to_string_pretty(&envelope)?;
    out.push('\n');
    Ok(out)
}

// ---------------------------------------------------------------------------
// Markdown: weekly report
// ---------------------------------------------------------------------------

/// Full weekly report.
pub fn render_markdown(insights: &WeeklyInsights) -> String {
    let week = insights
        .week
        .map(|w| w.to_string())
        .unwrap_or_else(|| "?".to_string());

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# Week {week} Report: {}", insights.team_name));
    lines.push(String::new());

    if let Some(matchup) = &insights.matchup {
        lines.extend(matchup_section(matchup));
        lines.push(String::new());
    }

    lines.extend(lineup_section(insights));
    lines.push(String::new());
    lines.extend(efficiency_section(insights));
    lines.push(String::new());
    lines.extend(bench_moves_section(&insights.projected));
    lines.push(String::new());
    lines.extend(free_agent_section(&insights.free_agents));
    lines.push(String::new());
    lines.extend(waiver_section(insights));

    let mut out = lines.join("\n").trim_end().to_string();
    out.push('\n');
    out
}

fn matchup_section(matchup: &MatchupSummary) -> Vec<String> {
    let team = &matchup.team;
    let opp = &matchup.opponent;
    let mut lines = vec![
        "## Matchup Snapshot".to_string(),
        String::new(),
        format!("| | {} | {} |", team.name, opp.name),
        "| --- | ---: | ---: |".to_string(),
        format!(
            "| Status | {} | {} |",
            matchup.status.label(),
            matchup.result.label()
        ),
        format!(
            "| Points | {} | {} |",
            fmt_opt_points(team.points),
            fmt_opt_points(opp.points)
        ),
        format!(
            "| Projected | {} | {} |",
            fmt_opt_points(team.projected_points),
            fmt_opt_points(opp.projected_points)
        ),
        format!(
            "| Win Probability | {} | {} |",
            fmt_pct(team.win_probability),
            fmt_pct(opp.win_probability)
        ),
    ];
    if matchup.is_playoffs {
        lines.push(String::new());
        lines.push("_Playoff matchup._".to_string());
    }
    lines
}

fn lineup_section(insights: &WeeklyInsights) -> Vec<String> {
    let lineup = &insights.lineup;
    let mut lines = vec!["## Lineup Breakdown".to_string(), String::new()];

    lines.push("### Starters".to_string());
    lines.extend(player_table(lineup.starters.iter().map(starter_row)));
    lines.push(String::new());
    lines.push("### Bench".to_string());
    lines.extend(player_table(lineup.bench.iter().map(|p| player_row("BN", p))));
    if !lineup.injured_reserve.is_empty() {
        lines.push(String::new());
        lines.push("### Injured Reserve".to_string());
        lines.extend(player_table(
            lineup.injured_reserve.iter().map(|p| player_row("IR", p)),
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "_Roster size: {} (Starters {}/{}, Bench {}, IR {})_",
        lineup.filled_slots + lineup.bench.len() + lineup.injured_reserve.len(),
        lineup.filled_slots,
        lineup.total_slots,
        lineup.bench.len(),
        lineup.injured_reserve.len()
    ));
    lines
}

fn starter_row(deployed: &DeployedSlot) -> String {
    let slot = deployed.slot.slot_type.display_str();
    match &deployed.player {
        Some(p) => player_row(slot, p),
        None => format!("| {slot} | _Empty_ | - | - | - |"),
    }
}

fn player_row(slot: &str, p: &Player) -> String {
    format!(
        "| {slot} | {} | {} | {} | {} |",
        p.name,
        p.position,
        fmt_points(p.projected_points),
        fmt_points(p.actual_points)
    )
}

fn player_table(rows: impl Iterator<Item = String>) -> Vec<String> {
    let mut lines = vec![
        "| Slot | Player | Pos | Proj | Points |".to_string(),
        "| --- | --- | --- | ---: | ---: |".to_string(),
    ];
    lines.extend(rows);
    if lines.len() == 2 {
        lines.push("| _No players_ |  |  |  |  |".to_string());
    }
    lines
}

fn efficiency_section(insights: &WeeklyInsights) -> Vec<String> {
    let mut lines = vec!["## Efficiency Check".to_string(), String::new()];

    lines.extend(efficiency_lines(&insights.projected));
    if let Some(actual) = &insights.actual {
        lines.extend(efficiency_lines(actual));
    }

    let review = &insights.bench_review;
    lines.push(String::new());
    lines.push(format!(
        "Bench projects {} across {} spots; starters project {}.",
        fmt_points(review.bench_projected),
        review.bench_count,
        fmt_points(review.starters_projected)
    ));
    if insights.actual.is_some() {
        lines.push(format!(
            "Bench scored {}; starters scored {}.",
            fmt_points(review.bench_actual),
            fmt_points(review.starters_actual)
        ));
    }
    lines
}

fn efficiency_lines(report: &EfficiencyReport) -> Vec<String> {
    let label = match report.metric {
        Metric::Projected => "Projected",
        Metric::Actual => "Actual",
    };
    let mut lines = vec![format!(
        "- {label}: deployed **{}**, optimal **{}** (gap {} pts{})",
        fmt_points(report.deployed_total),
        fmt_points(report.optimal_total),
        fmt_points(report.gap),
        report
            .efficiency_pct()
            .map(|pct| format!(", {pct:.1}% efficient"))
            .unwrap_or_default()
    )];
    for illegal in &report.illegal_assignments {
        lines.push(format!(
            "- _{} ({}) is not eligible for the {} slot._",
            illegal.player_name,
            illegal.position,
            illegal.slot.slot_type
        ));
    }
    lines
}

fn bench_moves_section(report: &EfficiencyReport) -> Vec<String> {
    let mut lines = vec!["## Bench Moves".to_string(), String::new()];
    if report.swaps.is_empty() {
        lines.push("No obvious bench upgrades surfaced this week.".to_string());
        return lines;
    }

    for swap in &report.swaps {
        let incoming = format!("**{}** ({})", swap.incoming.name, swap.incoming.position);
        let shifted = swap.vacated_slot != swap.slot;
        let line = match (&swap.outgoing, shifted) {
            (Some(out), false) => format!(
                "- Start {incoming} over **{}** ({}) at {}, projected swing {:.2} pts.",
                out.name, out.position, swap.slot.slot_type, swap.delta
            ),
            (Some(out), true) => format!(
                "- Start {incoming} at {} and bench **{}** ({}) from {}, projected swing {:.2} pts.",
                swap.slot.slot_type, out.name, out.position, swap.vacated_slot.slot_type, swap.delta
            ),
            (None, false) => format!(
                "- Start {incoming} in the empty {} slot, projected swing {:.2} pts.",
                swap.slot.slot_type, swap.delta
            ),
            (None, true) => format!(
                "- Start {incoming} at {} and shift starters into the empty {} slot, projected swing {:.2} pts.",
                swap.slot.slot_type, swap.vacated_slot.slot_type, swap.delta
            ),
        };
        lines.push(line);
    }
    lines
}

fn free_agent_section(free_agents: &[Player]) -> Vec<String> {
    let mut lines = vec!["## Free-Agent Radar".to_string(), String::new()];
    if free_agents.is_empty() {
        lines.push("No high-upside free agents identified right now.".to_string());
        return lines;
    }
    lines.extend(free_agent_table(free_agents.iter()));
    lines
}

fn free_agent_table<'a>(players: impl Iterator<Item = &'a Player>) -> Vec<String> {
    let mut lines = vec![
        "| Player | Pos | Team | Proj |".to_string(),
        "| --- | --- | --- | ---: |".to_string(),
    ];
    for p in players {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            p.name,
            p.position,
            if p.team.is_empty() { "-" } else { p.team.as_str() },
            fmt_points(p.projected_points)
        ));
    }
    lines
}

fn waiver_section(insights: &WeeklyInsights) -> Vec<String> {
    let mut lines = vec!["## Waiver Watch".to_string(), String::new()];
    let messages: Vec<&str> = insights
        .waiver_alerts
        .iter()
        .map(|a| a.message.trim())
        .filter(|m| !m.is_empty())
        .collect();
    if messages.is_empty() {
        lines.push("No immediate waiver recommendations this week.".to_string());
    } else {
        lines.extend(messages.into_iter().map(|m| format!("- {m}")));
    }
    lines
}

// ---------------------------------------------------------------------------
// Markdown: single-purpose commands
// ---------------------------------------------------------------------------

/// Optimal lineup next to the deployed one.
pub fn render_optimal_lineup(result: &OptimizationResult, report: &EfficiencyReport) -> String {
    let mut lines = vec![
        format!("## Optimal Lineup ({})", result.metric),
        String::new(),
        "| Slot | Player | Pos | Points |".to_string(),
        "| --- | --- | --- | ---: |".to_string(),
    ];
    for a in &result.assignments {
        lines.push(match &a.player {
            Some(p) => format!(
                "| {} | {} | {} | {} |",
                a.slot.slot_type,
                p.name,
                p.position,
                fmt_points(p.points(result.metric))
            ),
            None => format!("| {} | _Empty_ | - | - |", a.slot.slot_type),
        });
    }
    lines.push(String::new());
    lines.extend(efficiency_lines(report));
    lines.push(String::new());
    lines.extend(bench_moves_section(report));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Free-agent shortlist on its own.
pub fn render_free_agents(players: &[&Player], metric: Metric) -> String {
    let mut lines = vec![format!("## Free-Agent Radar ({metric})"), String::new()];
    if players.is_empty() {
        lines.push("No high-upside free agents identified right now.".to_string());
    } else {
        lines.extend(free_agent_table(players.iter().copied()));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn fmt_points(value: f64) -> String {
    format!("{value:.2}")
}

fn fmt_opt_points(value: Option<f64>) -> String {
    value.map(fmt_points).unwrap_or_else(|| "-".to_string())
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}%", v * 100.0))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchcoach_core::insight::{assemble, ActualPointsView, InsightRequest};
    use benchcoach_core::lineup::{LineupSlot, Position, Roster, SlotType};
    use chrono::TimeZone;

    fn player(id: &str, name: &str, pos: Position, proj: f64) -> Player {
        Player::new(id, name, pos, "KC", proj)
    }

    fn insights(bench: Vec<Player>, free_agents: &[Player]) -> WeeklyInsights {
        let roster = Roster::new(
            vec![
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::Quarterback, 0),
                    player: Some(player("qb", "Pat Passer", Position::Quarterback, 22.5)),
                },
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::Flex, 1),
                    player: Some(player("te", "Tom Tightend", Position::TightEnd, 6.0)),
                },
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::Kicker, 2),
                    player: None,
                },
            ],
            bench,
            vec![],
        )
        .unwrap();
        assemble(&InsightRequest {
            week: Some(3),
            team_name: "Gridiron Gang",
            roster: &roster,
            free_agents,
            free_agent_positions: None,
            free_agent_count: 3,
            matchup: None,
            actual_view: ActualPointsView::Never,
        })
        .unwrap()
    }

    #[test]
    fn markdown_has_every_section() {
        let fas = vec![player("fa", "Kyle Kicker", Position::Kicker, 8.25)];
        let md = render_markdown(&insights(
            vec![player("rb", "Rex Runner", Position::RunningBack, 10.5)],
            &fas,
        ));

        assert!(md.starts_with("# Week 3 Report: Gridiron Gang\n"));
        for heading in [
            "## Lineup Breakdown",
            "### Starters",
            "### Bench",
            "## Efficiency Check",
            "## Bench Moves",
            "## Free-Agent Radar",
            "## Waiver Watch",
        ] {
            assert!(md.contains(heading), "missing {heading}");
        }
        assert!(!md.contains("## Matchup Snapshot"));
        assert!(!md.contains("### Injured Reserve"));
        assert!(md.contains("| QB | Pat Passer | QB | 22.50 | 0.00 |"));
        assert!(md.contains("| K | _Empty_ | - | - | - |"));
        assert!(md.contains(
            "- Start **Rex Runner** (RB) over **Tom Tightend** (TE) at W/R/T, projected swing 4.50 pts."
        ));
        assert!(md.contains("| Kyle Kicker | K | KC | 8.25 |"));
        assert!(md.contains("No immediate waiver recommendations this week."));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn shifted_starter_move_names_both_slots() {
        let roster = Roster::new(
            vec![
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::Flex, 0),
                    player: Some(player("rb1", "Ace Back", Position::RunningBack, 20.0)),
                },
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::RunningBack, 1),
                    player: Some(player("rb2", "Slow Back", Position::RunningBack, 3.0)),
                },
            ],
            vec![player("wr", "Wide Open", Position::WideReceiver, 10.0)],
            vec![],
        )
        .unwrap();
        let report = assemble(&InsightRequest {
            week: Some(3),
            team_name: "Gridiron Gang",
            roster: &roster,
            free_agents: &[],
            free_agent_positions: None,
            free_agent_count: 3,
            matchup: None,
            actual_view: ActualPointsView::Never,
        })
        .unwrap();
        let md = render_markdown(&report);
        assert!(md.contains(
            "- Start **Wide Open** (WR) at W/R/T and bench **Slow Back** (RB) from RB, projected swing 7.00 pts."
        ));
    }

    #[test]
    fn markdown_empty_states() {
        let md = render_markdown(&insights(vec![], &[]));
        assert!(md.contains("| _No players_ |  |  |  |  |"));
        assert!(md.contains("No obvious bench upgrades surfaced this week."));
        assert!(md.contains("No high-upside free agents identified right now."));
        assert!(md.contains("gap 0.00 pts"));
    }

    #[test]
    fn json_envelope_carries_timestamp() {
        let report = insights(vec![], &[]);
        let at = Utc.with_ymd_and_hms(2024, 10, 6, 17, 0, 0).unwrap();
        let json = render_json(&report, at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generated_at"], "2024-10-06T17:00:00+00:00");
        assert_eq!(value["team_name"], "Gridiron Gang");
        assert_eq!(value["week"], 3);
    }

    #[test]
    fn percentages_and_missing_values() {
        assert_eq!(fmt_pct(Some(0.456)), "46%");
        assert_eq!(fmt_pct(None), "-");
        assert_eq!(fmt_opt_points(None), "-");
        assert_eq!(fmt_opt_points(Some(101.456)), "101.46");
    }
}
