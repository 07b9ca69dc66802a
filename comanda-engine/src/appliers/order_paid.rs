//! OrderPaid event applier
//!
//! Terminal transition. The table release itself is an index effect the
//! manager performs in the same transaction, keyed off this event.

use super::touch;
use crate::money;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// OrderPaid applier
pub struct OrderPaidApplier;

impl EventApplier for OrderPaidApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::OrderPaid { tip, .. } = &event.payload {
            snapshot.tip = *tip;
            snapshot.state = OrderState::Paid;
            money::recalculate_totals(snapshot);
            touch(snapshot, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::product::ProductCategory;
    use shared::order::snapshot::LineItem;
    use shared::order::state::LineItemState;
    use shared::order::OrderEventType;

    #[test]
    fn payment_applies_tip_and_terminal_state() {
        let mut snapshot = OrderSnapshot::new("o-1".to_string());
        snapshot.state = OrderState::Delivered;
        snapshot.items = vec![LineItem {
            line_id: "l-1".to_string(),
            product_id: "p-1".to_string(),
            name: "Bife".to_string(),
            category: ProductCategory::Food,
            unit_price: 1000.0,
            quantity: 1,
            state: LineItemState::Ready,
            prep_minutes: 25,
        }];
        snapshot.discount = 10.0;
        money::recalculate_totals(&mut snapshot);

        let event = OrderEvent::new(
            9,
            "o-1".to_string(),
            "m-1".to_string(),
            "Carla".to_string(),
            "cmd-9".to_string(),
            OrderEventType::OrderPaid,
            EventPayload::OrderPaid {
                tip: 100.0,
                total: 1090.0,
                table_id: Some("t-5".to_string()),
                table_number: Some(5),
            },
        );
        OrderPaidApplier.apply(&mut snapshot, &event);

        assert_eq!(snapshot.state, OrderState::Paid);
        assert_eq!(snapshot.tip, 100.0);
        assert!(money::money_eq(snapshot.total, 1090.0));
    }
}
