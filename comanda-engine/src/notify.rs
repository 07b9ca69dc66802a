//! Notification intent derivation and dispatch
//!
//! Intents are derived as a pure function of (event, post-apply snapshot,
//! staff directory) after the transaction commits. Delivery runs through
//! registered sinks fire-and-forget: a failing sink is logged at `warn!`
//! and never affects the committed transition.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use shared::models::customer::StaffRole;
use shared::notification::{NotificationIntent, NotificationKind};
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// Delivery failure; never propagated as a transition failure.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// External delivery adapter (push, realtime channel, email bridge).
///
/// Implementations should bound their own I/O with a timeout; the engine
/// treats a timed-out delivery as any other failed delivery.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifyError>;
}

/// Resolves role-addressed intents to the currently active staff members.
pub trait StaffDirectory: Send + Sync {
    fn active_staff(&self, role: StaffRole) -> Vec<String>;
}

/// Fixed staff roster, configured once at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticDirectory {
    staff: HashMap<StaffRole, Vec<String>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_staff(mut self, role: StaffRole, ids: &[&str]) -> Self {
        self.staff
            .entry(role)
            .or_default()
            .extend(ids.iter().map(|id| id.to_string()));
        self
    }
}

impl StaffDirectory for StaticDirectory {
    fn active_staff(&self, role: StaffRole) -> Vec<String> {
        self.staff.get(&role).cloned().unwrap_or_default()
    }
}

/// Sink that records every intent; used by tests and local mirrors.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<NotificationIntent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<NotificationIntent> {
        self.delivered.lock().clone()
    }

    pub fn clear(&self) {
        self.delivered.lock().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifyError> {
        self.delivered.lock().push(intent.clone());
        Ok(())
    }
}

/// Fans intents out to every registered sink.
pub struct NotificationDispatcher {
    directory: Arc<dyn StaffDirectory>,
    sinks: RwLock<Vec<Arc<dyn NotificationSink>>>,
}

impl NotificationDispatcher {
    pub fn new(directory: Arc<dyn StaffDirectory>) -> Self {
        Self {
            directory,
            sinks: RwLock::new(Vec::new()),
        }
    }

    pub fn add_sink(&self, sink: Arc<dyn NotificationSink>) {
        self.sinks.write().push(sink);
    }

    pub fn directory(&self) -> &dyn StaffDirectory {
        self.directory.as_ref()
    }

    /// Deliver fire-and-forget; failures are logged and swallowed.
    pub fn dispatch(&self, intents: &[NotificationIntent]) {
        let sinks = self.sinks.read();
        for intent in intents {
            for sink in sinks.iter() {
                if let Err(err) = sink.deliver(intent) {
                    warn!(
                        kind = ?intent.kind,
                        recipient = ?intent.recipient,
                        error = %err,
                        "Notification delivery failed; transition unaffected"
                    );
                }
            }
        }
    }
}

fn table_label(snapshot: &OrderSnapshot) -> String {
    match snapshot.table_number {
        Some(number) => format!("Table {}", number),
        None => "Delivery".to_string(),
    }
}

fn order_payload(snapshot: &OrderSnapshot) -> serde_json::Value {
    json!({
        "order_id": snapshot.order_id,
        "table_id": snapshot.table_id,
    })
}

fn to_each_staff(
    directory: &dyn StaffDirectory,
    role: StaffRole,
    kind: NotificationKind,
    title: &str,
    message: &str,
    payload: serde_json::Value,
    out: &mut Vec<NotificationIntent>,
) {
    for id in directory.active_staff(role) {
        out.push(NotificationIntent::to_staff(
            role,
            id,
            kind,
            title,
            message,
            payload.clone(),
        ));
    }
}

/// Derive the addressed intents for one committed event.
///
/// `snapshot` is the post-apply state of the event's order. Customer
/// intents go to the order's bound customer; waiter-role intents expand
/// to one per active waiter, owner/supervisor likewise.
pub fn intents_for_event(
    event: &OrderEvent,
    snapshot: &OrderSnapshot,
    directory: &dyn StaffDirectory,
) -> Vec<NotificationIntent> {
    let mut intents = Vec::new();
    let payload = order_payload(snapshot);
    let label = table_label(snapshot);

    match &event.payload {
        EventPayload::TableAssigned { table_number, .. } => {
            intents.push(NotificationIntent::to_customer(
                snapshot.customer.clone(),
                NotificationKind::TableAssigned,
                "Table assigned",
                format!("Your table is number {}", table_number),
                payload,
            ));
        }

        EventPayload::CartSubmitted { resubmission, .. } => {
            let title = if *resubmission {
                format!("{} - Updated order", label)
            } else {
                format!("{} - New order", label)
            };
            to_each_staff(
                directory,
                StaffRole::Waiter,
                NotificationKind::OrderModified,
                &title,
                &format!("Order placed for ${:.2}", snapshot.total),
                payload,
                &mut intents,
            );
        }

        EventPayload::OrderReturned { reason } => {
            intents.push(NotificationIntent::to_customer(
                snapshot.customer.clone(),
                NotificationKind::OrderRejected,
                "Order returned",
                format!("Staff returned your order: {}", reason),
                payload,
            ));
        }

        EventPayload::OrderConfirmed {} => {
            intents.push(NotificationIntent::to_customer(
                snapshot.customer.clone(),
                NotificationKind::OrderAccepted,
                "Order confirmed",
                "Your order was accepted and is heading to preparation",
                payload,
            ));
        }

        EventPayload::ItemReady { line_id } => {
            let item_name = snapshot
                .line(line_id)
                .map(|line| line.name.clone())
                .unwrap_or_else(|| "item".to_string());
            let message = if snapshot.state == shared::order::OrderState::Ready {
                format!("{}: '{}' ready - order complete", label, item_name)
            } else {
                format!("{}: '{}' ready", label, item_name)
            };
            to_each_staff(
                directory,
                StaffRole::Waiter,
                NotificationKind::OrderReady,
                "Order ready",
                &message,
                payload,
                &mut intents,
            );
        }

        EventPayload::OrderDelivered {} => {
            intents.push(NotificationIntent::to_customer(
                snapshot.customer.clone(),
                NotificationKind::OrderDelivered,
                "Order delivered",
                "Enjoy! Ask for the bill whenever you are ready",
                payload,
            ));
        }

        EventPayload::BillRequested {} => {
            to_each_staff(
                directory,
                StaffRole::Waiter,
                NotificationKind::BillRequested,
                "Bill requested",
                &format!("{} requests the bill", label),
                payload,
                &mut intents,
            );
        }

        EventPayload::OrderPaid { tip, total, .. } => {
            let message = format!("Payment of ${:.2} registered (tip ${:.2})", total, tip);
            for role in [StaffRole::Owner, StaffRole::Supervisor] {
                to_each_staff(
                    directory,
                    role,
                    NotificationKind::TableReleased,
                    "Payment completed",
                    &message,
                    payload.clone(),
                    &mut intents,
                );
            }
        }

        EventPayload::DeliveryOrderPlaced { address, .. } => {
            let message = format!("Order for ${:.2} to {}", snapshot.total, address);
            for role in [StaffRole::Owner, StaffRole::Supervisor] {
                to_each_staff(
                    directory,
                    role,
                    NotificationKind::NewDeliveryOrder,
                    "New delivery order",
                    &message,
                    payload.clone(),
                    &mut intents,
                );
            }
        }

        EventPayload::WaiterCalled {} => {
            to_each_staff(
                directory,
                StaffRole::Waiter,
                NotificationKind::WaiterCalled,
                "Table calling",
                &format!("{} needs your attention", label),
                payload,
                &mut intents,
            );
        }

        EventPayload::GameAttemptRecorded {
            customer,
            discount_granted,
            ..
        } => {
            if *discount_granted > 0.0 {
                intents.push(NotificationIntent::to_customer(
                    customer.clone(),
                    NotificationKind::DiscountGranted,
                    "Discount won",
                    format!("A ${:.2} discount was applied to your order", discount_granted),
                    payload,
                ));
            }
        }

        // Order creation shows up for staff only once a cart is placed.
        EventPayload::ItemPreparationStarted { .. } => {}
    }

    intents
}
