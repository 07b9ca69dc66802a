//! CartSubmitted event applier
//!
//! Replaces the order's pending lines with the submitted set. The old
//! lines are dropped and the new ones inserted in one fold, so the
//! persisted snapshot never holds duplicates or orphans.

use super::touch;
use crate::money;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot, OrderState};

/// CartSubmitted applier
pub struct CartSubmittedApplier;

impl EventApplier for CartSubmittedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::CartSubmitted { items, .. } = &event.payload {
            snapshot.items = items.clone();
            snapshot.state = OrderState::Placed;
            snapshot.return_reason = None;
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

    fn line(line_id: &str, unit_price: f64, quantity: i32) -> LineItem {
        LineItem {
            line_id: line_id.to_string(),
            product_id: "p-1".to_string(),
            name: "Empanada".to_string(),
            category: ProductCategory::Food,
            unit_price,
            quantity,
            state: LineItemState::Pending,
            prep_minutes: 15,
        }
    }

    fn submit_event(seq: u64, items: Vec<LineItem>) -> OrderEvent {
        OrderEvent::new(
            seq,
            "o-1".to_string(),
            "a-1".to_string(),
            "Ana".to_string(),
            format!("cmd-{seq}"),
            OrderEventType::CartSubmitted,
            EventPayload::CartSubmitted {
                items,
                resubmission: seq > 1,
            },
        )
    }

    #[test]
    fn resubmission_replaces_all_lines() {
        let mut snapshot = OrderSnapshot::new("o-1".to_string());

        CartSubmittedApplier.apply(
            &mut snapshot,
            &submit_event(1, vec![line("l-1", 500.0, 2), line("l-2", 300.0, 1)]),
        );
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.state, OrderState::Placed);
        assert_eq!(snapshot.subtotal, 1300.0);

        CartSubmittedApplier.apply(&mut snapshot, &submit_event(2, vec![line("l-3", 900.0, 1)]));
        let ids: Vec<&str> = snapshot.items.iter().map(|i| i.line_id.as_str()).collect();
        assert_eq!(ids, vec!["l-3"]);
        assert_eq!(snapshot.subtotal, 900.0);
        assert_eq!(snapshot.total, 900.0);
    }

    #[test]
    fn clears_return_reason() {
        let mut snapshot = OrderSnapshot::new("o-1".to_string());
        snapshot.return_reason = Some("missing drink choice".to_string());
        CartSubmittedApplier.apply(&mut snapshot, &submit_event(1, vec![line("l-1", 100.0, 1)]));
        assert!(snapshot.return_reason.is_none());
    }
}
