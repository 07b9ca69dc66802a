//! OrderConfirmed event applier

use super::touch;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// OrderConfirmed applier
pub struct OrderConfirmedApplier;

impl EventApplier for OrderConfirmedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderConfirmed {} = &event.payload {
            snapshot.state = OrderState::Confirmed;
            touch(snapshot, event);
        }
    }
}
