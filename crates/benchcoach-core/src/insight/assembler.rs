// Weekly insight assembly: one pass over a snapshot's parts producing
// everything the report renders.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::efficiency::{score_efficiency, EfficiencyReport};
use super::free_agents::rank_free_agents;
use super::matchup::{summarize_matchup, waiver_alerts, MatchupContext, MatchupSummary, WaiverAlert};
use super::optimizer::optimize_roster;
use crate::error::LineupError;
use crate::lineup::{round_points, DeployedSlot, Metric, Player, Position, Roster};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// When to compute the actual-points view alongside the projected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActualPointsView {
    /// Only once games have started or someone has scored.
    #[default]
    Auto,
    Always,
    Never,
}

impl ActualPointsView {
    pub fn from_str_view(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(ActualPointsView::Auto),
            "always" => Some(ActualPointsView::Always),
            "never" => Some(ActualPointsView::Never),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActualPointsView::Auto => "auto",
            ActualPointsView::Always => "always",
            ActualPointsView::Never => "never",
        }
    }
}

impl fmt::Display for ActualPointsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inputs for one week's insights.
#[derive(Debug, Clone)]
pub struct InsightRequest<'a> {
    pub week: Option<u32>,
    pub team_name: &'a str,
    pub roster: &'a Roster,
    pub free_agents: &'a [Player],
    /// Restrict the free-agent shortlist to these primary positions.
    pub free_agent_positions: Option<&'a [Position]>,
    pub free_agent_count: usize,
    pub matchup: Option<&'a MatchupContext>,
    pub actual_view: ActualPointsView,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The roster as deployed, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupBreakdown {
    pub starters: Vec<DeployedSlot>,
    pub bench: Vec<Player>,
    pub injured_reserve: Vec<Player>,
    pub filled_slots: usize,
    pub total_slots: usize,
}

/// Point totals for the deployed starters against the bench.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReview {
    pub starter_count: usize,
    pub bench_count: usize,
    pub starters_projected: f64,
    pub starters_actual: f64,
    pub bench_projected: f64,
    pub bench_actual: f64,
}

/// Everything computed for one team and week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyInsights {
    pub week: Option<u32>,
    pub team_name: String,
    pub matchup: Option<MatchupSummary>,
    pub lineup: LineupBreakdown,
    pub projected: EfficiencyReport,
    /// Present when the actual-points view was computed.
    pub actual: Option<EfficiencyReport>,
    pub bench_review: BenchReview,
    pub free_agents: Vec<Player>,
    pub waiver_alerts: Vec<WaiverAlert>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the week's insights.
///
/// Fails when a free agent is already on the roster, or when the roster's
/// lineup carries a slot that accepts no positions. Nothing here does I/O.
pub fn assemble(request: &InsightRequest<'_>) -> Result<WeeklyInsights, LineupError> {
    let roster = request.roster;

    for fa in request.free_agents {
        fa.validate()?;
        if roster.contains_player(&fa.id) {
            return Err(LineupError::RosteredFreeAgent {
                player_id: fa.id.clone(),
            });
        }
    }

    let projected_optimal = optimize_roster(roster, Metric::Projected)?;
    let projected = score_efficiency(roster, &projected_optimal);

    let actual = if wants_actual(request) {
        let actual_optimal = optimize_roster(roster, Metric::Actual)?;
        Some(score_efficiency(roster, &actual_optimal))
    } else {
        None
    };

    let free_agents: Vec<Player> = rank_free_agents(
        request.free_agents,
        request.free_agent_positions,
        request.free_agent_count,
        Metric::Projected,
    )
    .into_iter()
    .cloned()
    .collect();

    let matchup = request.matchup.map(summarize_matchup);
    let alerts = matchup.as_ref().map(waiver_alerts).unwrap_or_default();

    debug!(
        team = request.team_name,
        week = ?request.week,
        gap = projected.gap,
        swaps = projected.swaps.len(),
        actual = actual.is_some(),
        free_agents = free_agents.len(),
        alerts = alerts.len(),
        "weekly insights assembled"
    );

    Ok(WeeklyInsights {
        week: request.week,
        team_name: request.team_name.to_string(),
        matchup,
        lineup: breakdown(roster),
        projected,
        actual,
        bench_review: bench_review(roster),
        free_agents,
        waiver_alerts: alerts,
    })
}

fn wants_actual(request: &InsightRequest<'_>) -> bool {
    match request.actual_view {
        ActualPointsView::Always => true,
        ActualPointsView::Never => false,
        ActualPointsView::Auto => {
            let started = request
                .matchup
                .is_some_and(|m| m.status.has_started());
            started
                || request
                    .roster
                    .starters()
                    .chain(request.roster.bench().iter())
                    .any(|p| p.actual_points > 0.0)
        }
    }
}

fn breakdown(roster: &Roster) -> LineupBreakdown {
    LineupBreakdown {
        starters: roster.slots().to_vec(),
        bench: roster.bench().to_vec(),
        injured_reserve: roster.injured_reserve().to_vec(),
        filled_slots: roster.filled_count(),
        total_slots: roster.slot_count(),
    }
}

fn bench_review(roster: &Roster) -> BenchReview {
    BenchReview {
        starter_count: roster.filled_count(),
        bench_count: roster.bench().len(),
        starters_projected: round_points(roster.deployed_total(Metric::Projected)),
        starters_actual: round_points(roster.deployed_total(Metric::Actual)),
        bench_projected: round_points(roster.bench_total(Metric::Projected)),
        bench_actual: round_points(roster.bench_total(Metric::Actual)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::matchup::{MatchupStatus, MatchupTeam};
    use crate::lineup::{LineupSlot, SlotType};

    fn player(id: &str, pos: Position, proj: f64) -> Player {
        Player::new(id, format!("Player {id}"), pos, "TST", proj)
    }

    fn roster() -> Roster {
        Roster::new(
            vec![
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::Quarterback, 0),
                    player: Some(player("qb", Position::Quarterback, 19.0)),
                },
                DeployedSlot {
                    slot: LineupSlot::new(SlotType::WideReceiver, 1),
                    player: Some(player("wr", Position::WideReceiver, 8.0)),
                },
            ],
            vec![player("wr_bench", Position::WideReceiver, 11.5)],
            vec![player("ir", Position::RunningBack, 0.0)],
        )
        .unwrap()
    }

    fn request<'a>(roster: &'a Roster, fas: &'a [Player]) -> InsightRequest<'a> {
        InsightRequest {
            week: Some(7),
            team_name: "Gridiron Gang",
            roster,
            free_agents: fas,
            free_agent_positions: None,
            free_agent_count: 2,
            matchup: None,
            actual_view: ActualPointsView::Auto,
        }
    }

    fn matchup(status: MatchupStatus, win_probability: f64) -> MatchupContext {
        MatchupContext {
            status,
            is_playoffs: false,
            team: MatchupTeam {
                name: "Gridiron Gang".into(),
                win_probability: Some(win_probability),
                ..Default::default()
            },
            opponent: MatchupTeam {
                name: "Rivals".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn projected_view_and_shortlist() {
        let roster = roster();
        let fas = vec![
            player("fa1", Position::TightEnd, 6.0),
            player("fa2", Position::Kicker, 9.0),
            player("fa3", Position::RunningBack, 3.0),
        ];
        let insights = assemble(&request(&roster, &fas)).unwrap();

        assert_eq!(insights.projected.gap, 3.5);
        assert_eq!(insights.projected.swaps.len(), 1);
        assert!(insights.actual.is_none(), "nothing has been scored yet");
        let ids: Vec<&str> = insights.free_agents.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["fa2", "fa1"]);
        assert!(insights.matchup.is_none());
        assert!(insights.waiver_alerts.is_empty());

        assert_eq!(insights.lineup.total_slots, 2);
        assert_eq!(insights.lineup.injured_reserve.len(), 1);
        assert_eq!(insights.bench_review.starter_count, 2);
        assert_eq!(insights.bench_review.starters_projected, 27.0);
        assert_eq!(insights.bench_review.bench_projected, 11.5);
    }

    #[test]
    fn rostered_free_agent_is_rejected() {
        let roster = roster();
        let fas = vec![player("ir", Position::RunningBack, 4.0)];
        let err = assemble(&request(&roster, &fas)).unwrap_err();
        assert_eq!(
            err,
            LineupError::RosteredFreeAgent {
                player_id: "ir".into()
            }
        );
    }

    #[test]
    fn auto_view_turns_on_once_games_start() {
        let roster = roster();
        let live = matchup(MatchupStatus::Midevent, 0.7);
        let mut req = request(&roster, &[]);
        req.matchup = Some(&live);
        let insights = assemble(&req).unwrap();
        assert!(insights.actual.is_some());

        let pre = matchup(MatchupStatus::Preevent, 0.7);
        req.matchup = Some(&pre);
        assert!(assemble(&req).unwrap().actual.is_none());

        req.actual_view = ActualPointsView::Always;
        assert!(assemble(&req).unwrap().actual.is_some());
    }

    #[test]
    fn auto_view_turns_on_when_someone_scored() {
        let roster = Roster::new(
            vec![DeployedSlot {
                slot: LineupSlot::new(SlotType::Kicker, 0),
                player: Some(player("k", Position::Kicker, 8.0).with_actual(3.0)),
            }],
            vec![],
            vec![],
        )
        .unwrap();
        let mut req = request(&roster, &[]);
        assert!(assemble(&req).unwrap().actual.is_some());

        req.actual_view = ActualPointsView::Never;
        assert!(assemble(&req).unwrap().actual.is_none());
    }

    #[test]
    fn underdog_matchup_adds_waiver_alert() {
        let roster = roster();
        let ctx = matchup(MatchupStatus::Preevent, 0.41);
        let mut req = request(&roster, &[]);
        req.matchup = Some(&ctx);
        let insights = assemble(&req).unwrap();
        assert_eq!(insights.waiver_alerts.len(), 1);
        assert!(insights.waiver_alerts[0].message.contains("41%"));
    }

    #[test]
    fn view_parses_case_insensitively() {
        assert_eq!(ActualPointsView::from_str_view("ALWAYS"), Some(ActualPointsView::Always));
        assert_eq!(ActualPointsView::from_str_view(" never "), Some(ActualPointsView::Never));
        assert_eq!(ActualPointsView::from_str_view("sometimes"), None);
        assert_eq!(ActualPointsView::default(), ActualPointsView::Auto);
    }
}
