//! Order and line-item lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle state, in required order. No skipping, except the two
/// explicit back-edges: `Placed -> Placed` (resubmission) and
/// `Placed -> Pending` (staff return with reason).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Table occupied, no items confirmed yet
    #[default]
    Pending,
    /// Customer submitted a cart
    Placed,
    /// Staff accepted the order
    Confirmed,
    /// At least one line item in preparation
    Preparing,
    /// All line items ready
    Ready,
    /// Delivered to the table / dispatched
    Delivered,
    /// Payment settled; terminal
    Paid,
}

impl OrderState {
    pub fn is_terminal(self) -> bool {
        self == Self::Paid
    }

    /// An order counts as active (holding its table / customer binding)
    /// until payment settles.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// States in which a cart may be submitted or resubmitted.
    pub fn accepts_cart(self) -> bool {
        matches!(self, Self::Pending | Self::Placed)
    }

    /// States in which line items are worked by the sectors.
    pub fn in_preparation_phase(self) -> bool {
        matches!(self, Self::Confirmed | Self::Preparing)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Placed => "PLACED",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Paid => "PAID",
        };
        write!(f, "{}", s)
    }
}

/// Line-item preparation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemState {
    #[default]
    Pending,
    Preparing,
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_ordering_matches_lifecycle() {
        assert!(OrderState::Pending < OrderState::Placed);
        assert!(OrderState::Placed < OrderState::Confirmed);
        assert!(OrderState::Confirmed < OrderState::Preparing);
        assert!(OrderState::Preparing < OrderState::Ready);
        assert!(OrderState::Ready < OrderState::Delivered);
        assert!(OrderState::Delivered < OrderState::Paid);
    }

    #[test]
    fn paid_is_terminal() {
        assert!(OrderState::Paid.is_terminal());
        assert!(!OrderState::Paid.is_active());
        assert!(OrderState::Delivered.is_active());
    }

    #[test]
    fn cart_window() {
        assert!(OrderState::Pending.accepts_cart());
        assert!(OrderState::Placed.accepts_cart());
        assert!(!OrderState::Confirmed.accepts_cart());
    }
}
