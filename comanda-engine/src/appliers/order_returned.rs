//! OrderReturned event applier
//!
//! Back-edge: the order drops to `Pending` carrying the staff reason; the
//! existing lines stay until the customer resubmits.

use super::touch;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// OrderReturned applier
pub struct OrderReturnedApplier;

impl EventApplier for OrderReturnedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderReturned { reason } = &event.payload {
            snapshot.state = OrderState::Pending;
            snapshot.return_reason = Some(reason.clone());
            touch(snapshot, event);
        }
    }
}
