//! ConfirmOrder command handler
//!
//! Staff accepts a placed order; it enters the preparation phase and the
//! sector queues pick up its line items.

use super::FLOOR_ROLES;
use crate::traits::{require_staff, CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderState};

/// ConfirmOrder action
#[derive(Debug, Clone)]
pub struct ConfirmOrderAction {
    pub order_id: String,
}

impl CommandHandler for ConfirmOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, FLOOR_ROLES, "confirm an order")?;

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match snapshot.state {
            OrderState::Placed => {}
            OrderState::Confirmed => {
                return Err(OrderError::AlreadyInState(OrderState::Confirmed));
            }
            from => {
                return Err(OrderError::InvalidTransition {
                    from,
                    action: "confirm",
                });
            }
        }
        if snapshot.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::OrderConfirmed,
            EventPayload::OrderConfirmed {},
        );

        Ok(vec![event])
    }
}
