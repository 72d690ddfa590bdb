// Normalized week snapshot as produced by the league sync, and its conversion
// into validated lineup types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LineupError;
use crate::insight::MatchupContext;
use crate::lineup::{DeployedSlot, LineupSlot, Player, Position, Roster, SlotType};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A player entry as it appears in the snapshot. Positions are kept as raw
/// strings until conversion so a bad value can be reported with its player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPlayer {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub eligible_positions: Vec<String>,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub projected_points: f64,
    #[serde(default)]
    pub actual_points: f64,
    #[serde(default)]
    pub bye_week: Option<u32>,
}

/// One lineup entry. Bench and reserve designations are allowed here and are
/// routed off the starting lineup during conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSlot {
    pub slot: String,
    #[serde(default)]
    pub player: Option<SnapshotPlayer>,
}

/// Matchup block of the snapshot.
pub type SnapshotMatchup = MatchupContext;

/// Everything synced for one team and week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSnapshot {
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub team_key: Option<String>,
    pub team_name: String,
    #[serde(default)]
    pub lineup: Vec<SnapshotSlot>,
    #[serde(default)]
    pub bench: Vec<SnapshotPlayer>,
    #[serde(default)]
    pub injured_reserve: Vec<SnapshotPlayer>,
    #[serde(default)]
    pub free_agents: Vec<SnapshotPlayer>,
    #[serde(default)]
    pub matchup: Option<SnapshotMatchup>,
}

/// A snapshot converted into validated domain types.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekParts {
    pub week: Option<u32>,
    pub team_name: String,
    pub roster: Roster,
    pub free_agents: Vec<Player>,
    pub matchup: Option<MatchupContext>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

impl SnapshotPlayer {
    /// Convert into a [`Player`], zeroing points when `week` is the player's
    /// bye week.
    pub fn into_player(self, week: Option<u32>) -> Result<Player, LineupError> {
        let position =
            Position::from_str_pos(&self.position).ok_or_else(|| LineupError::UnknownPosition {
                player_id: self.id.clone(),
                value: self.position.clone(),
            })?;

        // Providers list slot designations (BN, W/R/T, ...) next to real
        // positions here; only real positions matter.
        let mut eligible_positions: Vec<Position> = Vec::new();
        for raw in &self.eligible_positions {
            match Position::from_str_pos(raw) {
                Some(pos) if pos != position && !eligible_positions.contains(&pos) => {
                    eligible_positions.push(pos)
                }
                Some(_) => {}
                None => debug!(player = %self.id, value = %raw, "ignoring non-position eligibility"),
            }
        }

        let player = Player {
            id: self.id,
            name: self.name,
            position,
            eligible_positions,
            team: self.team,
            projected_points: self.projected_points,
            actual_points: self.actual_points,
            bye_week: self.bye_week,
        }
        .on_bye_adjusted(week);

        player.validate()?;
        Ok(player)
    }
}

impl WeekSnapshot {
    /// Parse positions and slots, apply bye weeks, and build the roster.
    pub fn into_parts(self) -> Result<WeekParts, LineupError> {
        let week = self.week;
        let mut slots: Vec<DeployedSlot> = Vec::new();
        let mut bench: Vec<Player> = Vec::new();
        let mut reserve: Vec<Player> = Vec::new();

        for entry in self.lineup {
            let slot_type = SlotType::from_str_slot(&entry.slot).ok_or_else(|| {
                LineupError::UnknownSlot {
                    value: entry.slot.clone(),
                }
            })?;
            let player = entry.player.map(|p| p.into_player(week)).transpose()?;

            match slot_type {
                SlotType::Bench => bench.extend(player),
                SlotType::InjuredReserve => reserve.extend(player),
                _ => {
                    let order = slots.len();
                    slots.push(DeployedSlot {
                        slot: LineupSlot::new(slot_type, order),
                        player,
                    });
                }
            }
        }

        for p in self.bench {
            bench.push(p.into_player(week)?);
        }
        for p in self.injured_reserve {
            reserve.push(p.into_player(week)?);
        }

        let free_agents = self
            .free_agents
            .into_iter()
            .map(|p| p.into_player(week))
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen = HashSet::new();
        if let Some(dup) = free_agents.iter().find(|p| !seen.insert(p.id.as_str())) {
            return Err(LineupError::DuplicatePlayer {
                player_id: dup.id.clone(),
            });
        }

        let roster = Roster::new(slots, bench, reserve)?;

        debug!(
            team = %self.team_name,
            week = ?week,
            slots = roster.slot_count(),
            bench = roster.bench().len(),
            free_agents = free_agents.len(),
            "snapshot normalized"
        );

        Ok(WeekParts {
            week,
            team_name: self.team_name,
            roster,
            free_agents,
            matchup: self.matchup,
        })
    }
}
