// Player records and the point metric used to value them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::{Position, SlotType};
use crate::error::LineupError;

/// Largest point value a player may carry for one week.
pub const MAX_POINTS: f64 = 10_000.0;

/// Fixed-point resolution for comparing point totals: units per point.
pub const POINT_UNITS: f64 = 1_000_000.0;

/// Which point value a computation reads from each player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Projected,
    Actual,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Projected => "projected",
            Metric::Actual => "actual",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A player as loaded for a single scoring week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Primary position.
    pub position: Position,
    /// Additional positions the player may be slotted at. Empty means the
    /// primary position only.
    #[serde(default)]
    pub eligible_positions: Vec<Position>,
    pub team: String,
    pub projected_points: f64,
    /// Zero until the player's game kicks off.
    #[serde(default)]
    pub actual_points: f64,
    #[serde(default)]
    pub bye_week: Option<u32>,
}

impl Player {
    /// Build a single-position player with zero actual points.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        projected_points: f64,
    ) -> Self {
        Player {
            id: id.into(),
            name: name.into(),
            position,
            eligible_positions: Vec::new(),
            team: team.into(),
            projected_points,
            actual_points: 0.0,
            bye_week: None,
        }
    }

    pub fn with_actual(mut self, actual_points: f64) -> Self {
        self.actual_points = actual_points;
        self
    }

    pub fn with_eligible(mut self, positions: Vec<Position>) -> Self {
        self.eligible_positions = positions;
        self
    }

    /// The point value under `metric`.
    pub fn points(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Projected => self.projected_points,
            Metric::Actual => self.actual_points,
        }
    }

    /// The point value in integer millionths of a point. Two values closer
    /// than half a millionth map to the same unit count.
    pub fn point_units(&self, metric: Metric) -> i64 {
        (self.points(metric) * POINT_UNITS).round() as i64
    }

    /// Whether this player may occupy a slot of the given type.
    pub fn fits(&self, slot: SlotType) -> bool {
        super::position::accepts(slot, self.position)
            || self
                .eligible_positions
                .iter()
                .any(|&pos| super::position::accepts(slot, pos))
    }

    /// Reject negative, non-finite, or implausibly large point values.
    pub fn validate(&self) -> Result<(), LineupError> {
        let fields = [
            ("projected_points", self.projected_points),
            ("actual_points", self.actual_points),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(0.0..=MAX_POINTS).contains(&value) {
                return Err(LineupError::InvalidPoints {
                    player_id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Zero out both point values when the player is on bye this week.
    pub fn on_bye_adjusted(mut self, week: Option<u32>) -> Self {
        if week.is_some() && self.bye_week == week {
            self.projected_points = 0.0;
            self.actual_points = 0.0;
        }
        self
    }
}

/// Round a point total to two decimals for reporting.
pub fn round_points(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
