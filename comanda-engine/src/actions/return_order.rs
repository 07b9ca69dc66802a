//! ReturnOrder command handler
//!
//! Staff returns a placed order to the customer ("reject/observe"). The
//! reason is mandatory: the customer must see why before resubmitting.

use super::FLOOR_ROLES;
use crate::traits::{require_staff, CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderState};

/// ReturnOrder action
#[derive(Debug, Clone)]
pub struct ReturnOrderAction {
    pub order_id: String,
    pub reason: String,
}

impl CommandHandler for ReturnOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, FLOOR_ROLES, "return an order")?;

        if self.reason.trim().is_empty() {
            return Err(OrderError::ReasonRequired);
        }

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match snapshot.state {
            OrderState::Placed => {}
            OrderState::Pending => return Err(OrderError::AlreadyInState(OrderState::Pending)),
            from => {
                return Err(OrderError::InvalidTransition {
                    from,
                    action: "return",
                });
            }
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::OrderReturned,
            EventPayload::OrderReturned {
                reason: self.reason.trim().to_string(),
            },
        );

        Ok(vec![event])
    }
}
