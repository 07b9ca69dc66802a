//! RequestBill command handler
//!
//! No state change; the order stays where it is and waiters get an
//! addressed notification. Recorded as an event for the audit stream.

use crate::traits::{
    require_staff_or_customer, CommandContext, CommandHandler, CommandMetadata, OrderError,
};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderState};

/// RequestBill action
#[derive(Debug, Clone)]
pub struct RequestBillAction {
    pub order_id: String,
}

impl CommandHandler for RequestBillAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        require_staff_or_customer(&metadata.actor, &snapshot.customer, "request the bill")?;

        if !matches!(snapshot.state, OrderState::Ready | OrderState::Delivered) {
            return Err(OrderError::InvalidTransition {
                from: snapshot.state,
                action: "request the bill for",
            });
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::BillRequested,
            EventPayload::BillRequested {},
        );

        Ok(vec![event])
    }
}
