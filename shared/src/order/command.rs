//! Order commands - client requests to transition an order

use crate::models::customer::{ActorContext, CustomerRef};
use crate::models::game::GameKind;
use crate::models::product::{MenuProduct, ProductCategory};
use serde::{Deserialize, Serialize};

/// Cart line as submitted by a client. Prices and prep times are the
/// menu values at submission time; they become immutable on the line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineInput {
    pub product_id: String,
    pub name: String,
    pub category: ProductCategory,
    /// Unit price in currency unit
    pub unit_price: f64,
    pub quantity: i32,
    /// Estimated preparation time in minutes
    #[serde(default)]
    pub prep_minutes: u32,
}

impl CartLineInput {
    /// Capture a menu product into a cart line at its current price.
    pub fn from_product(product: &MenuProduct, quantity: i32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category,
            unit_price: product.price,
            quantity,
            prep_minutes: product.prep_minutes,
        }
    }
}

/// Command envelope. `command_id` is the idempotency key: redelivering
/// the same command is a no-op success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
    pub command_id: String,
    pub actor: ActorContext,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
    pub payload: OrderCommandPayload,
}

impl OrderCommand {
    pub fn new(actor: ActorContext, payload: OrderCommandPayload) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            actor,
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }

    /// Build a command with an explicit id, for redelivery scenarios and
    /// tests.
    pub fn with_id(
        command_id: impl Into<String>,
        actor: ActorContext,
        payload: OrderCommandPayload,
    ) -> Self {
        Self {
            command_id: command_id.into(),
            actor,
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommandPayload {
    /// Staff assigns a table to a waiting customer: creates the order in
    /// `Pending`, occupies the table and marks the wait-list entry
    /// attended, atomically.
    AssignTable {
        waitlist_entry_id: String,
        table_id: String,
    },

    /// Customer submits (or resubmits) a cart. While the order is still
    /// `Pending`/`Placed` this replaces all previous lines.
    SubmitCart {
        order_id: String,
        items: Vec<CartLineInput>,
    },

    /// Staff returns a placed order to the customer for revision; the
    /// reason is mandatory and is forwarded to the customer.
    ReturnOrder { order_id: String, reason: String },

    /// Staff accepts a placed order; it enters the preparation phase.
    ConfirmOrder { order_id: String },

    /// Sector action: begin preparing one line item. Idempotent.
    BeginItemPreparation { order_id: String, line_id: String },

    /// Sector action: finish one line item; may flip the whole order to
    /// `Ready`.
    FinishItemPreparation { order_id: String, line_id: String },

    /// Staff delivered the order to the table / dispatched it.
    MarkDelivered { order_id: String },

    /// Customer asks for the bill; waiters are notified, no state change.
    RequestBill { order_id: String },

    /// Staff settles the payment. Dine-in orders release their table in
    /// the same transaction.
    PayOrder { order_id: String, tip: f64 },

    /// Customer places a delivery order: created directly in `Placed`
    /// with its cart, no table binding.
    PlaceDeliveryOrder {
        customer: CustomerRef,
        address: String,
        items: Vec<CartLineInput>,
    },

    /// Customer calls a waiter to the table; no state change.
    CallWaiter { order_id: String },

    /// Record a mini-game attempt; the first attempt for the
    /// (order, customer) pair may grant a discount.
    RecordGameAttempt {
        order_id: String,
        customer: CustomerRef,
        game: GameKind,
        won: bool,
        attempt_number: u32,
    },
}
