// Lineup efficiency: how far the deployed lineup sits from the optimum, and
// which bench moves close the gap.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::optimizer::OptimizationResult;
use crate::lineup::{round_points, IllegalAssignment, LineupSlot, Metric, Player, Roster};

/// Start a bench player in place of a deployed starter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapSuggestion {
    /// Where the optimal lineup puts the bench player.
    pub slot: LineupSlot,
    /// The slot the outgoing starter gives up. Differs from `slot` when
    /// starters shift between slots to make room.
    pub vacated_slot: LineupSlot,
    /// The bench player who should start.
    pub incoming: Player,
    /// The starter who goes to the bench; `None` when `vacated_slot` was left
    /// empty.
    pub outgoing: Option<Player>,
    /// Points gained by the move. Always strictly positive.
    pub delta: f64,
}

/// Deployed lineup versus the optimum for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyReport {
    pub metric: Metric,
    pub deployed_total: f64,
    pub optimal_total: f64,
    /// `optimal_total - deployed_total`, floored at zero.
    pub gap: f64,
    /// Set when a deployed player sits in a slot that no longer accepts them.
    /// The gap is floored rather than going negative in that case.
    pub deployed_illegal: bool,
    pub illegal_assignments: Vec<IllegalAssignment>,
    /// Highest delta first.
    pub swaps: Vec<SwapSuggestion>,
}

impl EfficiencyReport {
    /// Share of the optimal total the deployed lineup captured, when defined.
    pub fn efficiency_pct(&self) -> Option<f64> {
        if self.optimal_total <= 0.0 {
            return None;
        }
        Some(round_points(
            (self.deployed_total / self.optimal_total * 100.0).min(100.0),
        ))
    }
}

/// Compare a deployed roster against an optimizer result computed over the
/// same candidate pool.
///
/// The result's slots are matched to the roster's by position in the list,
/// which holds whenever the result came from `optimize_roster` on this roster.
pub fn score_efficiency(roster: &Roster, optimal: &OptimizationResult) -> EfficiencyReport {
    let metric = optimal.metric;
    let deployed_total = roster.deployed_total(metric);
    let optimal_total = optimal.total;
    let illegal_assignments = roster.illegal_assignments();

    let swaps = bench_swaps(roster, optimal);

    EfficiencyReport {
        metric,
        deployed_total: round_points(deployed_total),
        optimal_total: round_points(optimal_total),
        gap: round_points((optimal_total - deployed_total).max(0.0)),
        deployed_illegal: !illegal_assignments.is_empty(),
        illegal_assignments,
        swaps,
    }
}

/// Pair each bench player the optimum starts with the starter it pushes out.
///
/// A bench player landing in a slot displaces that slot's deployed occupant.
/// When the occupant keeps a starting spot elsewhere, follow it to its new
/// slot and displace that occupant in turn, until the chain ends at a starter
/// who leaves the lineup or at a slot that was deployed empty. Each chain
/// visits distinct slots, so it ends within `slots().len()` steps.
fn bench_swaps(roster: &Roster, optimal: &OptimizationResult) -> Vec<SwapSuggestion> {
    let metric = optimal.metric;
    let deployed = roster.slots();
    let optimal_slot: HashMap<&str, usize> = optimal
        .assignments
        .iter()
        .enumerate()
        .filter_map(|(idx, a)| a.player.as_ref().map(|p| (p.id.as_str(), idx)))
        .collect();

    let mut swaps = Vec::new();
    for (landing, best) in optimal.assignments.iter().enumerate() {
        let Some(incoming) = best.player.as_ref() else {
            continue;
        };
        if !roster.bench().iter().any(|p| p.id == incoming.id) {
            continue;
        }

        let mut current = landing;
        let mut outgoing = None;
        for _ in 0..deployed.len() {
            let Some(occupant) = deployed.get(current).and_then(|d| d.player.as_ref()) else {
                break;
            };
            match optimal_slot.get(occupant.id.as_str()) {
                Some(&next) if next != current => current = next,
                _ => {
                    outgoing = Some(occupant);
                    break;
                }
            }
        }

        let delta =
            round_points(incoming.points(metric) - outgoing.map_or(0.0, |p| p.points(metric)));
        if delta <= 0.0 {
            continue;
        }
        swaps.push(SwapSuggestion {
            slot: best.slot,
            vacated_slot: deployed.get(current).map_or(best.slot, |d| d.slot),
            incoming: incoming.clone(),
            outgoing: outgoing.cloned(),
            delta,
        });
    }

    swaps.sort_by(|a, b| {
        b.delta
            .partial_cmp(&a.delta)
            .unwrap_or(Ordering::Equal)
            .then(a.slot.order.cmp(&b.slot.order))
    });
    swaps
}
