//! OrderDelivered event applier

use super::touch;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// OrderDelivered applier
pub struct OrderDeliveredApplier;

impl EventApplier for OrderDeliveredApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderDelivered {} = &event.payload {
            snapshot.state = OrderState::Delivered;
            touch(snapshot, event);
        }
    }
}
