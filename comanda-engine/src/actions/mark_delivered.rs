//! MarkDelivered command handler

use super::FLOOR_ROLES;
use crate::traits::{require_staff, CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderState};

/// MarkDelivered action
#[derive(Debug, Clone)]
pub struct MarkDeliveredAction {
    pub order_id: String,
}

impl CommandHandler for MarkDeliveredAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, FLOOR_ROLES, "mark an order delivered")?;

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match snapshot.state {
            OrderState::Ready => {}
            OrderState::Delivered => {
                return Err(OrderError::AlreadyInState(OrderState::Delivered));
            }
            from => {
                return Err(OrderError::InvalidTransition {
                    from,
                    action: "deliver",
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
            OrderEventType::OrderDelivered,
            EventPayload::OrderDelivered {},
        );

        Ok(vec![event])
    }
}
