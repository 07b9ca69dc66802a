//! TableAssigned event applier
//!
//! Initializes a dine-in order shell in `Pending`, bound to its table and
//! customer.

use super::touch;
use crate::traits::EventApplier;
use shared::order::snapshot::OrderChannel;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// TableAssigned applier
pub struct TableAssignedApplier;

impl EventApplier for TableAssignedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::TableAssigned {
            table_id,
            table_number,
            customer,
            ..
        } = &event.payload
        {
            // Set order_id from the event (important for replay scenarios)
            snapshot.order_id = event.order_id.clone();
            snapshot.channel = OrderChannel::DineIn;
            snapshot.table_id = Some(table_id.clone());
            snapshot.table_number = Some(*table_number);
            snapshot.customer = customer.clone();
            snapshot.state = OrderState::Pending;
            snapshot.created_at = event.timestamp;
            touch(snapshot, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::customer::CustomerRef;
    use shared::order::OrderEventType;

    #[test]
    fn initializes_pending_dine_in_order() {
        let mut snapshot = OrderSnapshot::new("o-1".to_string());
        let event = OrderEvent::new(
            1,
            "o-1".to_string(),
            "m-1".to_string(),
            "Carla".to_string(),
            "cmd-1".to_string(),
            OrderEventType::TableAssigned,
            EventPayload::TableAssigned {
                table_id: "t-5".to_string(),
                table_number: 5,
                waitlist_entry_id: "w-1".to_string(),
                customer: CustomerRef::Anonymous("a-123".to_string()),
            },
        );

        TableAssignedApplier.apply(&mut snapshot, &event);

        assert_eq!(snapshot.state, OrderState::Pending);
        assert_eq!(snapshot.channel, OrderChannel::DineIn);
        assert_eq!(snapshot.table_number, Some(5));
        assert_eq!(
            snapshot.customer,
            CustomerRef::Anonymous("a-123".to_string())
        );
        assert_eq!(snapshot.last_sequence, 1);
    }
}
