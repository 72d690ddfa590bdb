// Deployed roster: the starting lineup as set, plus bench and reserve.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::player::{Metric, Player};
use super::position::{Position, SlotType};
use crate::error::LineupError;

/// One starting slot in lineup display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineupSlot {
    pub slot_type: SlotType,
    /// Display index within the lineup. Not meaningful to the optimizer.
    pub order: usize,
}

impl LineupSlot {
    pub fn new(slot_type: SlotType, order: usize) -> Self {
        LineupSlot { slot_type, order }
    }

    /// Build slots from `(slot type, count)` pairs, numbering them in the
    /// order given.
    pub fn expand(requirements: &[(SlotType, usize)]) -> Vec<LineupSlot> {
        requirements
            .iter()
            .flat_map(|&(slot_type, count)| std::iter::repeat(slot_type).take(count))
            .enumerate()
            .map(|(order, slot_type)| LineupSlot { slot_type, order })
            .collect()
    }

    pub(crate) fn ensure_eligible_set(&self) -> Result<(), LineupError> {
        if self.slot_type.accepted_positions().is_empty() {
            return Err(LineupError::EmptyEligibility {
                slot: self.slot_type.display_str().to_string(),
            });
        }
        Ok(())
    }
}

/// A starting slot and whoever currently occupies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployedSlot {
    pub slot: LineupSlot,
    pub player: Option<Player>,
}

/// A deployed player sitting in a slot that does not accept any of their
/// positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IllegalAssignment {
    pub slot: LineupSlot,
    pub player_id: String,
    pub player_name: String,
    pub position: Position,
}

/// A team's roster for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    slots: Vec<DeployedSlot>,
    bench: Vec<Player>,
    injured_reserve: Vec<Player>,
}

impl Roster {
    /// Validate and build a roster.
    ///
    /// Fails when a lineup slot accepts no positions, when a player's points
    /// are invalid, or when the same player id shows up twice anywhere on the
    /// roster. Deployed players outside their slot's eligibility are kept and
    /// reported by [`Roster::illegal_assignments`].
    pub fn new(
        slots: Vec<DeployedSlot>,
        bench: Vec<Player>,
        injured_reserve: Vec<Player>,
    ) -> Result<Self, LineupError> {
        for deployed in &slots {
            deployed.slot.ensure_eligible_set()?;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let everyone = slots
            .iter()
            .filter_map(|s| s.player.as_ref())
            .chain(bench.iter())
            .chain(injured_reserve.iter());
        for player in everyone {
            player.validate()?;
            if !seen.insert(player.id.as_str()) {
                return Err(LineupError::DuplicatePlayer {
                    player_id: player.id.clone(),
                });
            }
        }

        Ok(Roster {
            slots,
            bench,
            injured_reserve,
        })
    }

    /// Append empty slots for any required slot type the lineup has fewer of.
    ///
    /// League settings are the source of truth for lineup shape; a snapshot
    /// that omits an unfilled slot still owes it.
    pub fn with_required_slots(
        mut self,
        requirements: &[(SlotType, usize)],
    ) -> Result<Self, LineupError> {
        let mut next_order = self
            .slots
            .iter()
            .map(|s| s.slot.order + 1)
            .max()
            .unwrap_or(0);

        for &(slot_type, required) in requirements {
            let slot = LineupSlot::new(slot_type, next_order);
            slot.ensure_eligible_set()?;

            let present = self
                .slots
                .iter()
                .filter(|s| s.slot.slot_type == slot_type)
                .count();
            if present < required {
                debug!(
                    slot = %slot_type,
                    present,
                    required,
                    "padding lineup with empty slots"
                );
            }
            for _ in present..required {
                self.slots.push(DeployedSlot {
                    slot: LineupSlot::new(slot_type, next_order),
                    player: None,
                });
                next_order += 1;
            }
        }
        Ok(self)
    }

    pub fn slots(&self) -> &[DeployedSlot] {
        &self.slots
    }

    pub fn bench(&self) -> &[Player] {
        &self.bench
    }

    pub fn injured_reserve(&self) -> &[Player] {
        &self.injured_reserve
    }

    /// The starting slots without their occupants.
    pub fn lineup_slots(&self) -> Vec<LineupSlot> {
        self.slots.iter().map(|s| s.slot).collect()
    }

    /// Deployed starters in slot order.
    pub fn starters(&self) -> impl Iterator<Item = &Player> {
        self.slots.iter().filter_map(|s| s.player.as_ref())
    }

    /// Every player who could start this week: deployed starters in slot
    /// order followed by the bench. Reserve players are excluded.
    pub fn candidate_pool(&self) -> Vec<Player> {
        self.starters().chain(self.bench.iter()).cloned().collect()
    }

    /// Id of the deployed occupant of each slot, aligned with `slots()`.
    pub fn incumbent_ids(&self) -> Vec<Option<&str>> {
        self.slots
            .iter()
            .map(|s| s.player.as_ref().map(|p| p.id.as_str()))
            .collect()
    }

    /// Sum of the deployed starters' points.
    pub fn deployed_total(&self, metric: Metric) -> f64 {
        self.starters().map(|p| p.points(metric)).sum()
    }

    /// Sum of the bench's points.
    pub fn bench_total(&self, metric: Metric) -> f64 {
        self.bench.iter().map(|p| p.points(metric)).sum()
    }

    /// Deployed assignments that violate the current eligibility table.
    pub fn illegal_assignments(&self) -> Vec<IllegalAssignment> {
        self.slots
            .iter()
            .filter_map(|s| {
                let player = s.player.as_ref()?;
                if player.fits(s.slot.slot_type) {
                    return None;
                }
                Some(IllegalAssignment {
                    slot: s.slot,
                    player_id: player.id.clone(),
                    player_name: player.name.clone(),
                    position: player.position,
                })
            })
            .collect()
    }

    /// Whether a player id appears anywhere on the roster, reserve included.
    pub fn contains_player(&self, player_id: &str) -> bool {
        self.starters()
            .chain(self.bench.iter())
            .chain(self.injured_reserve.iter())
            .any(|p| p.id == player_id)
    }

    /// Number of starting slots with an occupant.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.player.is_some()).count()
    }

    /// Number of starting slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
