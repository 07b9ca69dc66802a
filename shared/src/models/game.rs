//! Game Result Model
//!
//! One row per play attempt, recorded for analytics regardless of
//! eligibility. Only the first eligible win ever grants a discount.

use super::customer::CustomerRef;
use serde::{Deserialize, Serialize};

/// The four bundled mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameKind {
    Memory,
    Quiz,
    Math,
    Reflex,
}

impl GameKind {
    /// Flat discount granted by a first-try win, in currency units.
    pub const fn discount(self) -> f64 {
        match self {
            Self::Memory | Self::Quiz | Self::Math => 10.0,
            Self::Reflex => 20.0,
        }
    }
}

/// Recorded game attempt for an (order, customer) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub order_id: String,
    pub customer: CustomerRef,
    pub game: GameKind,
    pub won: bool,
    pub attempt_number: u32,
    /// Discount actually granted by this attempt (0 when ineligible).
    pub discount_granted: f64,
    pub recorded_at: i64,
}
