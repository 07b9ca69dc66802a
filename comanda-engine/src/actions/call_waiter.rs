//! CallWaiter command handler
//!
//! Customer asks for attention at the table. No state change.

use crate::traits::{
    require_staff_or_customer, CommandContext, CommandHandler, CommandMetadata, OrderError,
};
use shared::order::snapshot::OrderChannel;
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// CallWaiter action
#[derive(Debug, Clone)]
pub struct CallWaiterAction {
    pub order_id: String,
}

impl CommandHandler for CallWaiterAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        require_staff_or_customer(&metadata.actor, &snapshot.customer, "call a waiter")?;

        if !snapshot.is_active() {
            return Err(OrderError::InvalidTransition {
                from: snapshot.state,
                action: "call a waiter for",
            });
        }
        if snapshot.channel == OrderChannel::Delivery {
            return Err(OrderError::InvalidOperation(
                "delivery orders have no table to attend".to_string(),
            ));
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::WaiterCalled,
            EventPayload::WaiterCalled {},
        );

        Ok(vec![event])
    }
}
