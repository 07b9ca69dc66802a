//! Notification intents
//!
//! The engine never delivers notifications itself; every transition that
//! changes customer-visible state yields intents, and the caller wires a
//! sink that performs actual delivery (push, realtime channel, email).

use crate::models::customer::{CustomerRef, StaffRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification types, mirroring the app's realtime notification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    OrderAccepted,
    OrderRejected,
    OrderModified,
    OrderReady,
    OrderDelivered,
    TableAssigned,
    TableReleased,
    NewDeliveryOrder,
    BillRequested,
    WaiterCalled,
    NewReservation,
    ReservationConfirmed,
    ReservationRejected,
    DiscountGranted,
}

/// Addressed recipient of one intent. Role-addressed intents are expanded
/// to one intent per active staff member before dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recipient {
    Customer { customer: CustomerRef },
    Staff { role: StaffRole, id: String },
}

/// A structured message for one recipient. Delivery is fire-and-forget:
/// failures are logged by the dispatcher and never fail a transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub recipient: Recipient,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Structured context (order id, table id, ...) for deep links
    pub payload: Value,
}

impl NotificationIntent {
    pub fn to_customer(
        customer: CustomerRef,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            recipient: Recipient::Customer { customer },
            kind,
            title: title.into(),
            message: message.into(),
            payload,
        }
    }

    pub fn to_staff(
        role: StaffRole,
        id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            recipient: Recipient::Staff {
                role,
                id: id.into(),
            },
            kind,
            title: title.into(),
            message: message.into(),
            payload,
        }
    }
}
