//! SubmitCart command handler
//!
//! Customer submits or resubmits a cart while the order is still
//! `Pending`/`Placed`. A resubmission replaces all previous pending lines
//! rather than appending; the delete-then-insert happens atomically when
//! the event is applied inside the transaction.

use uuid::Uuid;

use crate::money;
use crate::traits::{
    require_staff_or_customer, CommandContext, CommandHandler, CommandMetadata, OrderError,
};
use shared::order::command::CartLineInput;
use shared::order::snapshot::LineItem;
use shared::order::state::LineItemState;
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderState};

/// SubmitCart action
#[derive(Debug, Clone)]
pub struct SubmitCartAction {
    pub order_id: String,
    pub items: Vec<CartLineInput>,
}

impl CommandHandler for SubmitCartAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        let snapshot = ctx.load_snapshot(&self.order_id)?;
        require_staff_or_customer(&metadata.actor, &snapshot.customer, "submit this cart")?;

        if !snapshot.state.accepts_cart() {
            return Err(OrderError::InvalidTransition {
                from: snapshot.state,
                action: "submit a cart for",
            });
        }
        if self.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        for line in &self.items {
            money::validate_cart_line(line)?;
        }

        let items: Vec<LineItem> = self.items.iter().map(new_line).collect();
        let resubmission = snapshot.state == OrderState::Placed || !snapshot.items.is_empty();

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::CartSubmitted,
            EventPayload::CartSubmitted {
                items,
                resubmission,
            },
        );

        Ok(vec![event])
    }
}

fn new_line(input: &CartLineInput) -> LineItem {
    LineItem {
        line_id: Uuid::new_v4().to_string(),
        product_id: input.product_id.clone(),
        name: input.name.clone(),
        category: input.category,
        unit_price: input.unit_price,
        quantity: input.quantity,
        state: LineItemState::Pending,
        prep_minutes: input.prep_minutes,
    }
}
