//! Reservation Model

use super::customer::CustomerRef;
use serde::{Deserialize, Serialize};

/// Tolerance before an unhonored reservation expires (45 minutes).
pub const HONOR_TOLERANCE_MS: i64 = 45 * 60 * 1000;

/// Reservation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationState {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Rejected,
    Expired,
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub customer: CustomerRef,
    /// Requested datetime (Unix milliseconds)
    pub requested_at: i64,
    pub party_size: i32,
    pub state: ReservationState,
    pub created_at: i64,
}

impl Reservation {
    pub fn new(
        id: String,
        customer: CustomerRef,
        requested_at: i64,
        party_size: i32,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            customer,
            requested_at,
            party_size,
            state: ReservationState::Pending,
            created_at,
        }
    }

    /// Still actionable: not yet honored, cancelled, rejected or expired.
    pub fn is_open(&self) -> bool {
        matches!(
            self.state,
            ReservationState::Pending | ReservationState::Confirmed
        )
    }

    /// The honoring window has passed.
    pub fn is_overdue(&self, now: i64) -> bool {
        now > self.requested_at + HONOR_TOLERANCE_MS
    }
}
