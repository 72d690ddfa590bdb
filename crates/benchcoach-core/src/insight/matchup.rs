// Head-to-head matchup context and the alerts derived from it.
//
// Scores and win probabilities come from the league provider; this module only
// classifies them.

use serde::{Deserialize, Serialize};

/// Where the matchup stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchupStatus {
    #[serde(alias = "pre_event", alias = "scheduled")]
    Preevent,
    #[serde(alias = "mid_event", alias = "live")]
    Midevent,
    #[serde(alias = "post_event", alias = "final")]
    Postevent,
}

impl MatchupStatus {
    /// Whether any games in the matchup have kicked off.
    pub fn has_started(&self) -> bool {
        matches!(self, MatchupStatus::Midevent | MatchupStatus::Postevent)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchupStatus::Preevent => "Pre-Game",
            MatchupStatus::Midevent => "In Progress",
            MatchupStatus::Postevent => "Final",
        }
    }
}

/// One side of the matchup as reported by the provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchupTeam {
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub projected_points: Option<f64>,
    #[serde(default)]
    pub win_probability: Option<f64>,
}

/// Externally supplied matchup snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupContext {
    pub status: MatchupStatus,
    #[serde(default)]
    pub is_playoffs: bool,
    pub team: MatchupTeam,
    pub opponent: MatchupTeam,
}

/// Outcome of the matchup from the user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupResult {
    Win,
    Loss,
    Tie,
    InProgress,
    Pending,
}

impl MatchupResult {
    pub fn label(&self) -> &'static str {
        match self {
            MatchupResult::Win => "Win",
            MatchupResult::Loss => "Loss",
            MatchupResult::Tie => "Tie",
            MatchupResult::InProgress => "In Progress",
            MatchupResult::Pending => "Pending",
        }
    }
}

/// Matchup context plus the derived result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupSummary {
    pub status: MatchupStatus,
    pub result: MatchupResult,
    pub is_playoffs: bool,
    pub team: MatchupTeam,
    pub opponent: MatchupTeam,
}

/// Classify a matchup. Missing point totals count as zero.
pub fn summarize_matchup(context: &MatchupContext) -> MatchupSummary {
    let result = match context.status {
        MatchupStatus::Postevent => {
            let ours = context.team.points.unwrap_or(0.0);
            let theirs = context.opponent.points.unwrap_or(0.0);
            if ours > theirs {
                MatchupResult::Win
            } else if ours < theirs {
                MatchupResult::Loss
            } else {
                MatchupResult::Tie
            }
        }
        MatchupStatus::Midevent => MatchupResult::InProgress,
        MatchupStatus::Preevent => MatchupResult::Pending,
    };

    MatchupSummary {
        status: context.status,
        result,
        is_playoffs: context.is_playoffs,
        team: context.team.clone(),
        opponent: context.opponent.clone(),
    }
}

/// What prompted a waiver alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaiverAlertKind {
    WinProbability,
}

/// A nudge toward the waiver wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaiverAlert {
    pub kind: WaiverAlertKind,
    pub message: String,
}

/// Win probability below which the team is treated as an underdog.
pub const UNDERDOG_THRESHOLD: f64 = 0.5;

/// Alerts for a matchup that is not going the user's way.
pub fn waiver_alerts(summary: &MatchupSummary) -> Vec<WaiverAlert> {
    let mut alerts = Vec::new();

    if let Some(prob) = summary.team.win_probability {
        if prob < UNDERDOG_THRESHOLD {
            alerts.push(WaiverAlert {
                kind: WaiverAlertKind::WinProbability,
                message: format!(
                    "Win probability sits at {:.0}%. Consider waiver moves or lineup tweaks to swing the matchup.",
                    prob * 100.0
                ),
            });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(status: MatchupStatus, ours: Option<f64>, theirs: Option<f64>) -> MatchupContext {
        MatchupContext {
            status,
            is_playoffs: false,
            team: MatchupTeam {
                name: "Home".into(),
                points: ours,
                win_probability: Some(0.62),
                ..Default::default()
            },
            opponent: MatchupTeam {
                name: "Away".into(),
                points: theirs,
                ..Default::default()
            },
        }
    }

    #[test]
    fn final_results() {
        let win = summarize_matchup(&context(MatchupStatus::Postevent, Some(110.2), Some(98.0)));
        assert_eq!(win.result, MatchupResult::Win);
        let loss = summarize_matchup(&context(MatchupStatus::Postevent, Some(90.0), Some(98.0)));
        assert_eq!(loss.result, MatchupResult::Loss);
        let tie = summarize_matchup(&context(MatchupStatus::Postevent, None, Some(0.0)));
        assert_eq!(tie.result, MatchupResult::Tie);
    }

    #[test]
    fn in_progress_and_pending() {
        let live = summarize_matchup(&context(MatchupStatus::Midevent, Some(40.0), Some(80.0)));
        assert_eq!(live.result, MatchupResult::InProgress);
        let pre = summarize_matchup(&context(MatchupStatus::Preevent, None, None));
        assert_eq!(pre.result, MatchupResult::Pending);
        assert!(!MatchupStatus::Preevent.has_started());
        assert!(MatchupStatus::Postevent.has_started());
    }

    #[test]
    fn underdog_gets_alert() {
        let mut ctx = context(MatchupStatus::Midevent, None, None);
        ctx.team.win_probability = Some(0.36);
        let alerts = waiver_alerts(&summarize_matchup(&ctx));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, WaiverAlertKind::WinProbability);
        assert!(alerts[0].message.contains("36%"));
    }

    #[test]
    fn favourite_or_unknown_probability_gets_none() {
        let ctx = context(MatchupStatus::Midevent, None, None);
        assert!(waiver_alerts(&summarize_matchup(&ctx)).is_empty());

        let mut unknown = ctx;
        unknown.team.win_probability = None;
        assert!(waiver_alerts(&summarize_matchup(&unknown)).is_empty());
    }

    #[test]
    fn status_deserializes_provider_strings() {
        let status: MatchupStatus = serde_json::from_str("\"midevent\"").unwrap();
        assert_eq!(status, MatchupStatus::Midevent);
        let status: MatchupStatus = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(status, MatchupStatus::Midevent);
        let status: MatchupStatus = serde_json::from_str("\"postevent\"").unwrap();
        assert_eq!(status, MatchupStatus::Postevent);
    }
}
