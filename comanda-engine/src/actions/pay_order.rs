//! PayOrder command handler
//!
//! Settles the payment. Dine-in orders carry their table binding in the
//! event so the table release lands in the same transaction; delivery
//! orders have no table to free.

use tracing::info;

use super::FLOOR_ROLES;
use crate::money;
use crate::traits::{require_staff, CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderState};

/// PayOrder action
#[derive(Debug, Clone)]
pub struct PayOrderAction {
    pub order_id: String,
    pub tip: f64,
}

impl CommandHandler for PayOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, FLOOR_ROLES, "settle a payment")?;
        money::validate_tip(self.tip)?;

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match snapshot.state {
            OrderState::Delivered => {}
            OrderState::Paid => return Err(OrderError::AlreadyInState(OrderState::Paid)),
            from => {
                return Err(OrderError::InvalidTransition {
                    from,
                    action: "settle payment for",
                });
            }
        }

        let total = money::settle_total(snapshot.subtotal, snapshot.discount, self.tip);

        info!(
            order_id = %self.order_id,
            total,
            tip = self.tip,
            table_number = ?snapshot.table_number,
            "Settling payment"
        );

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::OrderPaid,
            EventPayload::OrderPaid {
                tip: self.tip,
                total,
                table_id: snapshot.table_id.clone(),
                table_number: snapshot.table_number,
            },
        );

        Ok(vec![event])
    }
}
