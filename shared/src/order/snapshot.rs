//! Order snapshot - computed state from the event stream

use super::state::{LineItemState, OrderState};
use crate::models::customer::CustomerRef;
use crate::models::product::{ProductCategory, Sector};
use serde::{Deserialize, Serialize};

/// Order channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderChannel {
    #[default]
    DineIn,
    Delivery,
}

/// One ordered product line.
///
/// `unit_price` is captured at submission time and immutable thereafter;
/// menu price changes never touch an already-placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_id: String,
    pub product_id: String,
    pub name: String,
    pub category: ProductCategory,
    /// Unit price in currency unit, captured at order time
    pub unit_price: f64,
    pub quantity: i32,
    pub state: LineItemState,
    /// Estimated preparation time in minutes
    pub prep_minutes: u32,
}

impl LineItem {
    /// The single sector this line routes to.
    pub fn sector(&self) -> Sector {
        self.category.sector()
    }
}

/// Order snapshot - computed from the event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Order ID (assigned by the engine)
    pub order_id: String,
    pub channel: OrderChannel,
    /// Table binding; `None` for delivery orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    pub customer: CustomerRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub state: OrderState,
    pub items: Vec<LineItem>,
    /// Sum of line totals
    pub subtotal: f64,
    /// Game discount amount
    #[serde(default)]
    pub discount: f64,
    /// Tip amount, set at payment
    #[serde(default)]
    pub tip: f64,
    /// Invariant: `total = max(0, subtotal - discount + tip)`
    pub total: f64,
    /// Reason given by staff when the order was last returned to the
    /// customer for revision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_reason: Option<String>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
    /// Last update timestamp
    pub updated_at: i64,
    /// Last applied event sequence (for incremental updates)
    pub last_sequence: u64,
}

impl OrderSnapshot {
    /// Create a new empty order shell; creation events fill it in.
    pub fn new(order_id: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            order_id,
            channel: OrderChannel::DineIn,
            table_id: None,
            table_number: None,
            customer: CustomerRef::default(),
            delivery_address: None,
            state: OrderState::Pending,
            items: Vec::new(),
            subtotal: 0.0,
            discount: 0.0,
            tip: 0.0,
            total: 0.0,
            return_reason: None,
            created_at: now,
            updated_at: now,
            last_sequence: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn line(&self, line_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.line_id == line_id)
    }

    pub fn line_mut(&mut self, line_id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.line_id == line_id)
    }

    /// Recompute the derived `Preparing`/`Ready` edge from line-item
    /// states. Order-level state on this edge is never set directly:
    /// `Ready` iff every item is ready (and there is at least one);
    /// `Preparing` iff any item has started and not all are ready.
    ///
    /// Must be called after every line-item state change.
    pub fn refresh_progress(&mut self) {
        if !self.state.in_preparation_phase() {
            return;
        }
        if !self.items.is_empty() && self.items.iter().all(|i| i.state == LineItemState::Ready) {
            self.state = OrderState::Ready;
        } else if self
            .items
            .iter()
            .any(|i| i.state != LineItemState::Pending)
        {
            self.state = OrderState::Preparing;
        }
    }

    /// Estimated preparation time: the slowest item dominates.
    pub fn estimated_prep_minutes(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.prep_minutes)
            .max()
            .unwrap_or(0)
    }
}
