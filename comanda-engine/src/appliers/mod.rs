//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles one
//! specific event type. Appliers are PURE functions over
//! (snapshot, event); replaying the stream reproduces the snapshot.

use enum_dispatch::enum_dispatch;

use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

mod cart_submitted;
mod delivery_placed;
mod game_recorded;
mod item_states;
mod noted;
mod order_confirmed;
mod order_delivered;
mod order_paid;
mod order_returned;
mod table_assigned;

pub use cart_submitted::CartSubmittedApplier;
pub use delivery_placed::DeliveryOrderPlacedApplier;
pub use game_recorded::GameAttemptRecordedApplier;
pub use item_states::{ItemPreparationStartedApplier, ItemReadyApplier};
pub use noted::{BillRequestedApplier, WaiterCalledApplier};
pub use order_confirmed::OrderConfirmedApplier;
pub use order_delivered::OrderDeliveredApplier;
pub use order_paid::OrderPaidApplier;
pub use order_returned::OrderReturnedApplier;
pub use table_assigned::TableAssignedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    TableAssigned(TableAssignedApplier),
    DeliveryOrderPlaced(DeliveryOrderPlacedApplier),
    CartSubmitted(CartSubmittedApplier),
    OrderReturned(OrderReturnedApplier),
    OrderConfirmed(OrderConfirmedApplier),
    ItemPreparationStarted(ItemPreparationStartedApplier),
    ItemReady(ItemReadyApplier),
    OrderDelivered(OrderDeliveredApplier),
    BillRequested(BillRequestedApplier),
    OrderPaid(OrderPaidApplier),
    WaiterCalled(WaiterCalledApplier),
    GameAttemptRecorded(GameAttemptRecordedApplier),
}

/// Convert OrderEvent reference to EventAction.
///
/// This is the ONLY place with a match on EventPayload.
impl From<&OrderEvent> for EventAction {
    fn from(event: &OrderEvent) -> Self {
        match &event.payload {
            EventPayload::TableAssigned { .. } => Self::TableAssigned(TableAssignedApplier),
            EventPayload::DeliveryOrderPlaced { .. } => {
                Self::DeliveryOrderPlaced(DeliveryOrderPlacedApplier)
            }
            EventPayload::CartSubmitted { .. } => Self::CartSubmitted(CartSubmittedApplier),
            EventPayload::OrderReturned { .. } => Self::OrderReturned(OrderReturnedApplier),
            EventPayload::OrderConfirmed {} => Self::OrderConfirmed(OrderConfirmedApplier),
            EventPayload::ItemPreparationStarted { .. } => {
                Self::ItemPreparationStarted(ItemPreparationStartedApplier)
            }
            EventPayload::ItemReady { .. } => Self::ItemReady(ItemReadyApplier),
            EventPayload::OrderDelivered {} => Self::OrderDelivered(OrderDeliveredApplier),
            EventPayload::BillRequested {} => Self::BillRequested(BillRequestedApplier),
            EventPayload::OrderPaid { .. } => Self::OrderPaid(OrderPaidApplier),
            EventPayload::WaiterCalled {} => Self::WaiterCalled(WaiterCalledApplier),
            EventPayload::GameAttemptRecorded { .. } => {
                Self::GameAttemptRecorded(GameAttemptRecordedApplier)
            }
        }
    }
}

/// Stamp the bookkeeping fields every applier maintains.
pub(crate) fn touch(snapshot: &mut OrderSnapshot, event: &OrderEvent) {
    snapshot.updated_at = event.timestamp;
    snapshot.last_sequence = event.sequence;
}
