// Positions, slot types, and the eligibility table between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Football positions a player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "DEF")]
    Defense,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    /// Parse a position string into a Position enum.
    ///
    /// Handles common provider abbreviations:
    /// - "DEF" / "D/ST" / "DST" / "D" -> Defense
    /// - "K" / "PK" -> Kicker
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" | "PK" => Some(Position::Kicker),
            "DEF" | "D/ST" | "DST" | "D" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Lineup slot designations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotType {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "DEF")]
    Defense,
    #[serde(rename = "W/R/T")]
    Flex,
    #[serde(rename = "W/R")]
    WideReceiverRunningBack,
    #[serde(rename = "W/T")]
    WideReceiverTightEnd,
    #[serde(rename = "Q/W/R/T")]
    SuperFlex,
    #[serde(rename = "BN")]
    Bench,
    #[serde(rename = "IR")]
    InjuredReserve,
}

const QB_ONLY: &[Position] = &[Position::Quarterback];
const RB_ONLY: &[Position] = &[Position::RunningBack];
const WR_ONLY: &[Position] = &[Position::WideReceiver];
const TE_ONLY: &[Position] = &[Position::TightEnd];
const K_ONLY: &[Position] = &[Position::Kicker];
const DEF_ONLY: &[Position] = &[Position::Defense];
const W_R_T: &[Position] = &[
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];
const W_R: &[Position] = &[Position::RunningBack, Position::WideReceiver];
const W_T: &[Position] = &[Position::WideReceiver, Position::TightEnd];
const Q_W_R_T: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
];
const NONE: &[Position] = &[];

impl SlotType {
    /// Parse a slot designation as used by league settings and roster payloads.
    ///
    /// - "W/R/T" / "FLEX" / "RB/WR/TE" -> Flex
    /// - "Q/W/R/T" / "OP" / "SUPERFLEX" -> SuperFlex
    /// - "BN" / "BE" / "BENCH" -> Bench, "IR" / "IL" -> InjuredReserve
    pub fn from_str_slot(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(SlotType::Quarterback),
            "RB" => Some(SlotType::RunningBack),
            "WR" => Some(SlotType::WideReceiver),
            "TE" => Some(SlotType::TightEnd),
            "K" | "PK" => Some(SlotType::Kicker),
            "DEF" | "D/ST" | "DST" => Some(SlotType::Defense),
            "W/R/T" | "FLEX" | "RB/WR/TE" => Some(SlotType::Flex),
            "W/R" | "RB/WR" => Some(SlotType::WideReceiverRunningBack),
            "W/T" | "WR/TE" => Some(SlotType::WideReceiverTightEnd),
            "Q/W/R/T" | "OP" | "SUPERFLEX" => Some(SlotType::SuperFlex),
            "BN" | "BE" | "BENCH" => Some(SlotType::Bench),
            "IR" | "IL" => Some(SlotType::InjuredReserve),
            _ => None,
        }
    }

    /// Return the display string for this slot.
    pub fn display_str(&self) -> &'static str {
        match self {
            SlotType::Quarterback => "QB",
            SlotType::RunningBack => "RB",
            SlotType::WideReceiver => "WR",
            SlotType::TightEnd => "TE",
            SlotType::Kicker => "K",
            SlotType::Defense => "DEF",
            SlotType::Flex => "W/R/T",
            SlotType::WideReceiverRunningBack => "W/R",
            SlotType::WideReceiverTightEnd => "W/T",
            SlotType::SuperFlex => "Q/W/R/T",
            SlotType::Bench => "BN",
            SlotType::InjuredReserve => "IR",
        }
    }

    /// Every position this slot may hold. Empty for bench and reserve.
    pub fn accepted_positions(&self) -> &'static [Position] {
        match self {
            SlotType::Quarterback => QB_ONLY,
            SlotType::RunningBack => RB_ONLY,
            SlotType::WideReceiver => WR_ONLY,
            SlotType::TightEnd => TE_ONLY,
            SlotType::Kicker => K_ONLY,
            SlotType::Defense => DEF_ONLY,
            SlotType::Flex => W_R_T,
            SlotType::WideReceiverRunningBack => W_R,
            SlotType::WideReceiverTightEnd => W_T,
            SlotType::SuperFlex => Q_W_R_T,
            SlotType::Bench | SlotType::InjuredReserve => NONE,
        }
    }

    /// Whether this slot counts toward the starting lineup.
    pub fn is_starting(&self) -> bool {
        !matches!(self, SlotType::Bench | SlotType::InjuredReserve)
    }

    /// Deterministic ordering index for lineup display.
    pub fn sort_order(&self) -> u8 {
        match self {
            SlotType::Quarterback => 0,
            SlotType::RunningBack => 1,
            SlotType::WideReceiver => 2,
            SlotType::TightEnd => 3,
            SlotType::WideReceiverRunningBack => 4,
            SlotType::WideReceiverTightEnd => 5,
            SlotType::Flex => 6,
            SlotType::SuperFlex => 7,
            SlotType::Kicker => 8,
            SlotType::Defense => 9,
            SlotType::Bench => 10,
            SlotType::InjuredReserve => 11,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Whether a slot of type `slot` may hold a player at `position`.
pub fn accepts(slot: SlotType, position: Position) -> bool {
    match (slot, position) {
        (SlotType::Quarterback, Position::Quarterback) => true,
        (SlotType::RunningBack, Position::RunningBack) => true,
        (SlotType::WideReceiver, Position::WideReceiver) => true,
        (SlotType::TightEnd, Position::TightEnd) => true,
        (SlotType::Kicker, Position::Kicker) => true,
        (SlotType::Defense, Position::Defense) => true,
        (
            SlotType::Flex,
            Position::RunningBack | Position::WideReceiver | Position::TightEnd,
        ) => true,
        (SlotType::WideReceiverRunningBack, Position::RunningBack | Position::WideReceiver) => {
            true
        }
        (SlotType::WideReceiverTightEnd, Position::WideReceiver | Position::TightEnd) => true,
        (
            SlotType::SuperFlex,
            Position::Quarterback
            | Position::RunningBack
            | Position::WideReceiver
            | Position::TightEnd,
        ) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SLOTS: [SlotType; 12] = [
        SlotType::Quarterback,
        SlotType::RunningBack,
        SlotType::WideReceiver,
        SlotType::TightEnd,
        SlotType::Kicker,
        SlotType::Defense,
        SlotType::Flex,
        SlotType::WideReceiverRunningBack,
        SlotType::WideReceiverTightEnd,
        SlotType::SuperFlex,
        SlotType::Bench,
        SlotType::InjuredReserve,
    ];

    #[test]
    fn accepts_agrees_with_accepted_positions() {
        for slot in ALL_SLOTS {
            for pos in Position::ALL {
                assert_eq!(
                    accepts(slot, pos),
                    slot.accepted_positions().contains(&pos),
                    "{slot} / {pos}"
                );
            }
        }
    }

    #[test]
    fn single_position_slots_accept_exactly_one() {
        for slot in [
            SlotType::Quarterback,
            SlotType::RunningBack,
            SlotType::WideReceiver,
            SlotType::TightEnd,
            SlotType::Kicker,
            SlotType::Defense,
        ] {
            assert_eq!(slot.accepted_positions().len(), 1);
        }
    }

    #[test]
    fn flex_accepts_skill_positions_only() {
        assert!(accepts(SlotType::Flex, Position::RunningBack));
        assert!(accepts(SlotType::Flex, Position::WideReceiver));
        assert!(accepts(SlotType::Flex, Position::TightEnd));
        assert!(!accepts(SlotType::Flex, Position::Quarterback));
        assert!(!accepts(SlotType::Flex, Position::Kicker));
        assert!(accepts(SlotType::SuperFlex, Position::Quarterback));
        assert!(!accepts(SlotType::SuperFlex, Position::Defense));
    }

    #[test]
    fn bench_and_reserve_accept_nothing() {
        for pos in Position::ALL {
            assert!(!accepts(SlotType::Bench, pos));
            assert!(!accepts(SlotType::InjuredReserve, pos));
        }
        assert!(!SlotType::Bench.is_starting());
        assert!(SlotType::Flex.is_starting());
    }

    #[test]
    fn position_parsing_aliases() {
        assert_eq!(Position::from_str_pos("qb"), Some(Position::Quarterback));
        assert_eq!(Position::from_str_pos("D/ST"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("DST"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("PK"), Some(Position::Kicker));
        assert_eq!(Position::from_str_pos("LB"), None);
        assert_eq!(Position::from_str_pos(""), None);
    }

    #[test]
    fn slot_parsing_round_trips_display() {
        for slot in ALL_SLOTS {
            assert_eq!(SlotType::from_str_slot(slot.display_str()), Some(slot));
        }
        assert_eq!(SlotType::from_str_slot("FLEX"), Some(SlotType::Flex));
        assert_eq!(SlotType::from_str_slot("OP"), Some(SlotType::SuperFlex));
        assert_eq!(SlotType::from_str_slot("BE"), Some(SlotType::Bench));
        assert_eq!(SlotType::from_str_slot("X/Y"), None);
    }
}
