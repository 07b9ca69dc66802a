//! Order events - immutable facts recorded after command processing

use super::snapshot::LineItem;
use crate::models::customer::CustomerRef;
use crate::models::game::GameKind;
use serde::{Deserialize, Serialize};

/// Order event - immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Event unique ID
    pub event_id: String,
    /// Global sequence number; the authoritative ordering for state
    /// evolution and replay
    pub sequence: u64,
    /// Order this event belongs to
    pub order_id: String,
    /// Server timestamp (Unix milliseconds), set when the event is created
    pub timestamp: i64,
    /// Actor who triggered this event
    pub actor_id: String,
    /// Actor name (snapshot for audit)
    pub actor_name: String,
    /// Command that triggered this event (for audit tracing)
    pub command_id: String,
    /// Event type
    pub event_type: OrderEventType,
    /// Event payload
    pub payload: EventPayload,
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    // Lifecycle
    TableAssigned,
    DeliveryOrderPlaced,
    CartSubmitted,
    OrderReturned,
    OrderConfirmed,
    OrderDelivered,
    OrderPaid,

    // Line items
    ItemPreparationStarted,
    ItemReady,

    // Side channels
    BillRequested,
    WaiterCalled,
    GameAttemptRecorded,
}

impl std::fmt::Display for OrderEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TableAssigned => "TABLE_ASSIGNED",
            Self::DeliveryOrderPlaced => "DELIVERY_ORDER_PLACED",
            Self::CartSubmitted => "CART_SUBMITTED",
            Self::OrderReturned => "ORDER_RETURNED",
            Self::OrderConfirmed => "ORDER_CONFIRMED",
            Self::OrderDelivered => "ORDER_DELIVERED",
            Self::OrderPaid => "ORDER_PAID",
            Self::ItemPreparationStarted => "ITEM_PREPARATION_STARTED",
            Self::ItemReady => "ITEM_READY",
            Self::BillRequested => "BILL_REQUESTED",
            Self::WaiterCalled => "WAITER_CALLED",
            Self::GameAttemptRecorded => "GAME_ATTEMPT_RECORDED",
        };
        write!(f, "{}", s)
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    TableAssigned {
        table_id: String,
        table_number: u32,
        waitlist_entry_id: String,
        customer: CustomerRef,
    },

    DeliveryOrderPlaced {
        customer: CustomerRef,
        address: String,
        /// Complete snapshots of the submitted lines
        items: Vec<LineItem>,
    },

    CartSubmitted {
        /// Complete snapshots of the new lines; they replace any
        /// previously pending ones
        items: Vec<LineItem>,
        /// Whether this replaced an earlier submission
        resubmission: bool,
    },

    OrderReturned {
        reason: String,
    },

    OrderConfirmed {},

    ItemPreparationStarted {
        line_id: String,
    },

    ItemReady {
        line_id: String,
    },

    OrderDelivered {},

    BillRequested {},

    OrderPaid {
        tip: f64,
        total: f64,
        /// Table released by this payment; `None` for delivery orders
        #[serde(skip_serializing_if = "Option::is_none")]
        table_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        table_number: Option<u32>,
    },

    WaiterCalled {},

    GameAttemptRecorded {
        customer: CustomerRef,
        game: GameKind,
        won: bool,
        attempt_number: u32,
        /// Discount granted by this attempt (0 when ineligible)
        discount_granted: f64,
    },
}

impl OrderEvent {
    /// Create a new event.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        order_id: String,
        actor_id: String,
        actor_name: String,
        command_id: String,
        event_type: OrderEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            order_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            actor_id,
            actor_name,
            command_id,
            event_type,
            payload,
        }
    }

}
