//! AssignTable command handler
//!
//! Staff assigns a free table to a waiting customer. Emits the event that
//! creates the order in `Pending`, occupies the table and marks the
//! wait-list entry attended; all three land in the same transaction.

use tracing::info;
use uuid::Uuid;

use super::FLOOR_ROLES;
use crate::traits::{require_staff, CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// AssignTable action
#[derive(Debug, Clone)]
pub struct AssignTableAction {
    pub waitlist_entry_id: String,
    pub table_id: String,
}

impl CommandHandler for AssignTableAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, FLOOR_ROLES, "assign a table")?;

        let entry = ctx
            .get_waitlist_entry(&self.waitlist_entry_id)?
            .ok_or_else(|| OrderError::WaitlistEntryNotFound(self.waitlist_entry_id.clone()))?;
        if !entry.is_waiting() {
            return Err(OrderError::WaitlistEntryAttended(self.waitlist_entry_id.clone()));
        }

        let table = ctx
            .get_table(&self.table_id)?
            .ok_or_else(|| OrderError::TableNotFound(self.table_id.clone()))?;
        if !table.is_free() {
            return Err(OrderError::TableOccupied(table.number.to_string()));
        }
        // The occupancy flag and the active-order index must agree; check
        // both so a half-migrated store still refuses double seating.
        if ctx.find_active_order_for_table(&self.table_id)?.is_some() {
            return Err(OrderError::TableOccupied(table.number.to_string()));
        }

        if let Some(existing) = ctx.find_active_order_for_customer(&entry.customer)? {
            return Err(OrderError::CustomerAlreadyAssigned {
                customer: entry.customer.clone(),
                order_id: existing,
            });
        }

        let order_id = Uuid::new_v4().to_string();
        let seq = ctx.next_sequence();

        info!(
            order_id = %order_id,
            table_number = table.number,
            customer = %entry.customer,
            "Assigning table"
        );

        let event = OrderEvent::new(
            seq,
            order_id,
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::TableAssigned,
            EventPayload::TableAssigned {
                table_id: self.table_id.clone(),
                table_number: table.number,
                waitlist_entry_id: self.waitlist_entry_id.clone(),
                customer: entry.customer,
            },
        );

        Ok(vec![event])
    }
}
