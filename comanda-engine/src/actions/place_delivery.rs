//! PlaceDeliveryOrder command handler
//!
//! Delivery orders skip the table flow entirely: they are created
//! directly in `Placed` with their cart, and payment later settles with
//! no table mutation.

use uuid::Uuid;

use crate::money;
use crate::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::customer::CustomerRef;
use shared::order::command::CartLineInput;
use shared::order::snapshot::LineItem;
use shared::order::state::LineItemState;
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// PlaceDeliveryOrder action
#[derive(Debug, Clone)]
pub struct PlaceDeliveryOrderAction {
    pub customer: CustomerRef,
    pub address: String,
    pub items: Vec<CartLineInput>,
}

impl CommandHandler for PlaceDeliveryOrderAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        // A customer may only order for themselves; staff may place on
        // behalf of any customer (phone orders).
        if let Some(actor_customer) = metadata.actor.customer()
            && actor_customer != &self.customer
        {
            return Err(OrderError::RoleNotAllowed("place an order for another customer"));
        }

        if self.address.trim().is_empty() {
            return Err(OrderError::InvalidOperation(
                "delivery address is required".to_string(),
            ));
        }
        if self.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        for line in &self.items {
            money::validate_cart_line(line)?;
        }

        let items: Vec<LineItem> = self
            .items
            .iter()
            .map(|input| LineItem {
                line_id: Uuid::new_v4().to_string(),
                product_id: input.product_id.clone(),
                name: input.name.clone(),
                category: input.category,
                unit_price: input.unit_price,
                quantity: input.quantity,
                state: LineItemState::Pending,
                prep_minutes: input.prep_minutes,
            })
            .collect();

        let order_id = Uuid::new_v4().to_string();
        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            order_id,
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::DeliveryOrderPlaced,
            EventPayload::DeliveryOrderPlaced {
                customer: self.customer.clone(),
                address: self.address.trim().to_string(),
                items,
            },
        );

        Ok(vec![event])
    }
}
