// Lineup domain: positions, slots, players, and deployed rosters.

pub mod player;
pub mod position;
pub mod roster;

pub use player::{round_points, Metric, Player, MAX_POINTS, POINT_UNITS};
pub use position::{accepts, Position, SlotType};
pub use roster::{DeployedSlot, IllegalAssignment, LineupSlot, Roster};
