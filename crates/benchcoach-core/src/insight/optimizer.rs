// Exact lineup optimization.
//
// Assigning players to lineup slots is a maximum-weight bipartite matching
// problem: flex slots overlap the single-position slots, so filling slots one
// at a time with the best remaining player can strand a high scorer. The
// optimizer solves the assignment exactly with Kuhn-Munkres.

use std::collections::{HashMap, HashSet};

use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;
use serde::Serialize;
use tracing::debug;

use crate::error::LineupError;
use crate::lineup::{LineupSlot, Metric, Player, Roster};

/// Weight of a slot/player pair the eligibility table forbids. Any negative
/// weight loses to an unused "leave empty" column, and one is always free.
const INELIGIBLE: i64 = -1;

/// Most starting slots one lineup may have. With points capped at
/// `MAX_POINTS`, this keeps every packed weight and the solver's running
/// totals well inside `i64`.
pub const MAX_SLOTS: usize = 256;

/// What the deployed lineup had in a slot, as seen from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Incumbent {
    /// No deployment recorded, or the occupant is not in the pool.
    Unknown,
    /// The slot was deployed empty.
    Empty,
    /// Pool index of the deployed occupant.
    Player(usize),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A lineup slot and the player the optimizer placed in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotAssignment {
    pub slot: LineupSlot,
    pub player: Option<Player>,
}

/// The best achievable lineup for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub metric: Metric,
    /// One entry per lineup slot, in the order the slots were supplied.
    pub assignments: Vec<SlotAssignment>,
    pub total: f64,
    /// Candidates left out of the lineup, in pool order.
    pub unused: Vec<Player>,
}

impl OptimizationResult {
    /// Number of slots the optimizer filled.
    pub fn filled_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.player.is_some()).count()
    }

    /// Ids of the placed players, aligned with `assignments`.
    pub fn assigned_ids(&self) -> Vec<Option<&str>> {
        self.assignments
            .iter()
            .map(|a| a.player.as_ref().map(|p| p.id.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Optimizer
// ---------------------------------------------------------------------------

/// Solves one lineup: a fixed list of slots against a pool of candidates.
///
/// Among assignments with the same maximum total, the optimizer prefers the
/// one that matches the deployed lineup in the most slots (an empty slot
/// matches a slot deployed empty), then the one that fills the most slots.
///
/// Totals are compared in millionths of a point, so players whose points
/// differ by less than that can be treated as equal.
#[derive(Debug)]
pub struct LineupOptimizer<'a> {
    slots: &'a [LineupSlot],
    pool: &'a [Player],
    incumbents: Vec<Incumbent>,
}

impl<'a> LineupOptimizer<'a> {
    /// Validate the problem. Every slot needs a non-empty eligibility set,
    /// the slot count is capped at `MAX_SLOTS`, pool ids must be unique and
    /// point values must pass `Player::validate`.
    pub fn new(slots: &'a [LineupSlot], pool: &'a [Player]) -> Result<Self, LineupError> {
        if slots.len() > MAX_SLOTS {
            return Err(LineupError::TooManySlots {
                count: slots.len(),
                max: MAX_SLOTS,
            });
        }
        for slot in slots {
            slot.ensure_eligible_set()?;
        }
        let mut seen = HashSet::new();
        for player in pool {
            if !seen.insert(player.id.as_str()) {
                return Err(LineupError::DuplicatePlayer {
                    player_id: player.id.clone(),
                });
            }
            player.validate()?;
        }

        Ok(LineupOptimizer {
            slots,
            pool,
            incumbents: vec![Incumbent::Unknown; slots.len()],
        })
    }

    /// Record who currently holds each slot, aligned with the slot list.
    /// `None` marks a slot deployed empty; ids not present in the pool are
    /// ignored.
    pub fn with_incumbents(mut self, ids: &[Option<&str>]) -> Self {
        let index: HashMap<&str, usize> = self
            .pool
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.as_str(), i))
            .collect();
        for (slot_idx, id) in ids.iter().enumerate().take(self.slots.len()) {
            self.incumbents[slot_idx] = match id {
                None => Incumbent::Empty,
                Some(id) => index
                    .get(id)
                    .map_or(Incumbent::Unknown, |&col| Incumbent::Player(col)),
            };
        }
        self
    }

    /// Compute the maximum-total lineup under `metric`.
    pub fn solve(&self, metric: Metric) -> OptimizationResult {
        let slot_count = self.slots.len();
        let pool_size = self.pool.len();

        if slot_count == 0 || pool_size == 0 {
            return OptimizationResult {
                metric,
                assignments: self
                    .slots
                    .iter()
                    .map(|&slot| SlotAssignment { slot, player: None })
                    .collect(),
                total: 0.0,
                unused: self.pool.to_vec(),
            };
        }

        // Lexicographic objective packed into one integer: points first,
        // slots matching the deployment second, filled slots third. Match and
        // fill counts are each at most `slot_count`, so scaling by
        // `slot_count + 1` keeps the tiers from bleeding into each other.
        // Points are at most `MAX_POINTS * POINT_UNITS` = 1e10 units, so a
        // weight stays below 1e10 * 257^2 and a full lineup below 1e10 * 257^3.
        let scale = slot_count as i64 + 1;
        let columns = pool_size + slot_count;
        let weights = Matrix::from_fn(slot_count, columns, |(row, col)| {
            if col >= pool_size {
                return i64::from(self.incumbents[row] == Incumbent::Empty) * scale;
            }
            let slot = self.slots[row];
            let player = &self.pool[col];
            if !player.fits(slot.slot_type) {
                return INELIGIBLE;
            }
            let matched = i64::from(self.incumbents[row] == Incumbent::Player(col));
            (player.point_units(metric) * scale + matched) * scale + 1
        });

        let (_, columns_by_slot) = kuhn_munkres(&weights);

        let mut used = vec![false; pool_size];
        let mut total = 0.0;
        let assignments: Vec<SlotAssignment> = self
            .slots
            .iter()
            .zip(columns_by_slot.iter())
            .map(|(&slot, &col)| {
                let player = if col < pool_size && self.pool[col].fits(slot.slot_type) {
                    used[col] = true;
                    total += self.pool[col].points(metric);
                    Some(self.pool[col].clone())
                } else {
                    None
                };
                SlotAssignment { slot, player }
            })
            .collect();

        let unused: Vec<Player> = self
            .pool
            .iter()
            .zip(used.iter())
            .filter(|(_, &was_used)| !was_used)
            .map(|(p, _)| p.clone())
            .collect();

        debug!(
            metric = %metric,
            slots = slot_count,
            candidates = pool_size,
            total,
            unused = unused.len(),
            "lineup optimized"
        );

        OptimizationResult {
            metric,
            assignments,
            total,
            unused,
        }
    }
}

/// Optimize a roster's lineup over its full candidate pool (starters and
/// bench), preferring to keep the deployed players in place on ties.
pub fn optimize_roster(roster: &Roster, metric: Metric) -> Result<OptimizationResult, LineupError> {
    let slots = roster.lineup_slots();
    let pool = roster.candidate_pool();
    let incumbents = roster.incumbent_ids();
    let optimizer = LineupOptimizer::new(&slots, &pool)?.with_incumbents(&incumbents);
    Ok(optimizer.solve(metric))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
