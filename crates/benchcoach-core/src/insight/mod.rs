// Weekly insights: optimal lineups, efficiency, free agents, matchup context.

pub mod assembler;
pub mod efficiency;
pub mod free_agents;
pub mod matchup;
pub mod optimizer;

pub use assembler::{
    assemble, ActualPointsView, BenchReview, InsightRequest, LineupBreakdown, WeeklyInsights,
};
pub use efficiency::{score_efficiency, EfficiencyReport, SwapSuggestion};
pub use free_agents::rank_free_agents;
pub use matchup::{
    summarize_matchup, waiver_alerts, MatchupContext, MatchupResult, MatchupStatus,
    MatchupSummary, MatchupTeam, WaiverAlert, WaiverAlertKind,
};
pub use optimizer::{optimize_roster, LineupOptimizer, OptimizationResult, SlotAssignment};
