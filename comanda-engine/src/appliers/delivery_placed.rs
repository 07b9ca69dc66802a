//! DeliveryOrderPlaced event applier

use super::touch;
use crate::money;
use crate::traits::EventApplier;
use shared::order::snapshot::OrderChannel;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// DeliveryOrderPlaced applier
pub struct DeliveryOrderPlacedApplier;

impl EventApplier for DeliveryOrderPlacedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::DeliveryOrderPlaced {
            customer,
            address,
            items,
        } = &event.payload
        {
            snapshot.order_id = event.order_id.clone();
            snapshot.channel = OrderChannel::Delivery;
            snapshot.table_id = None;
            snapshot.table_number = None;
            snapshot.customer = customer.clone();
            snapshot.delivery_address = Some(address.clone());
            snapshot.items = items.clone();
            snapshot.state = OrderState::Placed;
            snapshot.created_at = event.timestamp;
            money::recalculate_totals(snapshot);
            touch(snapshot, event);
        }
    }
}
