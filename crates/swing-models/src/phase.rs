//! Canonical golf swing phases.
//!
//! Each phase sits at a fixed fraction of the detected swing window. The
//! table mirrors the P-system used by coaches (P1 address through P9 finish).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A named position within the golf swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SwingPhase {
    Address,
    Takeaway,
    Backswing,
    Top,
    Transition,
    Downswing,
    Impact,
    FollowThrough,
    Finish,
}

impl SwingPhase {
    /// All phases in swing order.
    pub const ALL: [SwingPhase; 9] = [
        SwingPhase::Address,
        SwingPhase::Takeaway,
        SwingPhase::Backswing,
        SwingPhase::Top,
        SwingPhase::Transition,
        SwingPhase::Downswing,
        SwingPhase::Impact,
        SwingPhase::FollowThrough,
        SwingPhase::Finish,
    ];

    /// Fraction of the swing window at which this phase occurs.
    pub fn fraction(&self) -> f64 {
        match self {
            SwingPhase::Address => 0.00,
            SwingPhase::Takeaway => 0.15,
            SwingPhase::Backswing => 0.35,
            SwingPhase::Top => 0.50,
            SwingPhase::Transition => 0.65,
            SwingPhase::Downswing => 0.80,
            SwingPhase::Impact => 0.90,
            SwingPhase::FollowThrough => 0.97,
            SwingPhase::Finish => 1.00,
        }
    }

    /// Position number in the P-system (1-9).
    pub fn position(&self) -> u8 {
        match self {
            SwingPhase::Address => 1,
            SwingPhase::Takeaway => 2,
            SwingPhase::Backswing => 3,
            SwingPhase::Top => 4,
            SwingPhase::Transition => 5,
            SwingPhase::Downswing => 6,
            SwingPhase::Impact => 7,
            SwingPhase::FollowThrough => 8,
            SwingPhase::Finish => 9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwingPhase::Address => "address",
            SwingPhase::Takeaway => "takeaway",
            SwingPhase::Backswing => "backswing",
            SwingPhase::Top => "top",
            SwingPhase::Transition => "transition",
            SwingPhase::Downswing => "downswing",
            SwingPhase::Impact => "impact",
            SwingPhase::FollowThrough => "follow_through",
            SwingPhase::Finish => "finish",
        }
    }

    /// Tag used in frame file names, e.g. `P7_impact`.
    pub fn file_tag(&self) -> String {
        format!("P{}_{}", self.position(), self.as_str())
    }
}

impl fmt::Display for SwingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SwingPhase {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwingPhase::ALL
            .iter()
            .copied()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| ModelError::UnknownPhase(s.to_string()))
    }
}
