// Lineup optimization and weekly insight engine.

pub mod error;
pub mod insight;
pub mod lineup;
pub mod snapshot;

pub use error::LineupError;
pub use insight::{
    assemble, optimize_roster, rank_free_agents, score_efficiency, ActualPointsView,
    EfficiencyReport, InsightRequest, OptimizationResult, WeeklyInsights,
};
pub use lineup::{DeployedSlot, LineupSlot, Metric, Player, Position, Roster, SlotType};
pub use snapshot::{WeekParts, WeekSnapshot};
