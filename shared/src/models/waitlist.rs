//! Wait-list Model

use super::customer::CustomerRef;
use serde::{Deserialize, Serialize};

/// Wait-list entry state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitlistState {
    #[default]
    Waiting,
    Attended,
}

/// Wait-list entry, created when a customer scans the entry QR.
///
/// Transitions to `Attended` when staff assigns a table, atomically with
/// the order creation and table occupation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
    pub customer: CustomerRef,
    /// Entry timestamp (Unix milliseconds); arrival order.
    pub joined_at: i64,
    pub state: WaitlistState,
}

impl WaitlistEntry {
    pub fn new(id: String, customer: CustomerRef, joined_at: i64) -> Self {
        Self {
            id,
            customer,
            joined_at,
            state: WaitlistState::Waiting,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.state == WaitlistState::Waiting
    }
}
