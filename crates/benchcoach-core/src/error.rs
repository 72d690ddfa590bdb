// Error taxonomy for lineup computations.

use thiserror::Error;

/// Everything that can stop a weekly computation.
///
/// Configuration errors describe a malformed league/slot definition.
/// Everything else is an input-validation failure tied to a specific player.
/// Degenerate inputs (empty roster, empty pool, zero requested free agents)
/// are never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineupError {
    #[error("slot `{slot}` accepts no positions and cannot be part of a starting lineup")]
    EmptyEligibility { slot: String },

    #[error("unrecognized slot type `{value}`")]
    UnknownSlot { value: String },

    #[error("lineup has {count} starting slots, more than the supported {max}")]
    TooManySlots { count: usize, max: usize },

    #[error("player `{player_id}` has unrecognized position `{value}`")]
    UnknownPosition { player_id: String, value: String },

    #[error("player `{player_id}` appears more than once in the snapshot")]
    DuplicatePlayer { player_id: String },

    #[error("player `{player_id}` has invalid {field} value {value}")]
    InvalidPoints {
        player_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("free agent `{player_id}` is already on the roster")]
    RosteredFreeAgent { player_id: String },
}

impl LineupError {
    /// Whether this error stems from league configuration rather than player data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LineupError::EmptyEligibility { .. }
                | LineupError::UnknownSlot { .. }
                | LineupError::TooManySlots { .. }
        )
    }

    /// The player identifier responsible for an input-validation failure.
    pub fn player_id(&self) -> Option<&str> {
        match self {
            LineupError::UnknownPosition { player_id, .. }
            | LineupError::DuplicatePlayer { player_id }
            | LineupError::InvalidPoints { player_id, .. }
            | LineupError::RosteredFreeAgent { player_id } => Some(player_id),
            LineupError::EmptyEligibility { .. }
            | LineupError::UnknownSlot { .. }
            | LineupError::TooManySlots { .. } => None,
        }
    }
}
