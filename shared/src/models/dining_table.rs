//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy state. Toggled only by assignment and payment
/// transitions, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableState {
    #[default]
    Free,
    Occupied,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub number: u32,
    pub capacity: i32,
    pub state: TableState,
}

impl DiningTable {
    pub fn new(id: String, number: u32, capacity: i32) -> Self {
        Self {
            id,
            number,
            capacity,
            state: TableState::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == TableState::Free
    }
}
