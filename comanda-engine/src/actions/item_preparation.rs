//! Sector command handlers: begin / finish preparation of one line item
//!
//! Both are idempotent: re-applying a transition the item has already
//! made is a silent no-op success, so duplicate or out-of-order
//! redelivery from sector clients never errors and never double-fires
//! side effects.

use super::SECTOR_ROLES;
use crate::traits::{require_staff, CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::state::LineItemState;
use shared::order::{EventPayload, OrderEvent, OrderEventType, OrderSnapshot, OrderState};

fn preparation_guard(
    snapshot: &OrderSnapshot,
    line_id: &str,
    action: &'static str,
) -> Result<LineItemState, OrderError> {
    // `Ready` stays accepted so a redelivered sector action on an
    // already-finished item lands on the no-op path instead of erroring.
    let workable = snapshot.state.in_preparation_phase() || snapshot.state == OrderState::Ready;
    if !workable {
        return Err(OrderError::InvalidTransition {
            from: snapshot.state,
            action,
        });
    }
    let line = snapshot
        .line(line_id)
        .ok_or_else(|| OrderError::ItemNotFound(line_id.to_string()))?;
    Ok(line.state)
}

/// BeginItemPreparation action
#[derive(Debug, Clone)]
pub struct BeginItemPreparationAction {
    pub order_id: String,
    pub line_id: String,
}

impl CommandHandler for BeginItemPreparationAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, SECTOR_ROLES, "begin item preparation")?;

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match preparation_guard(&snapshot, &self.line_id, "begin preparation for")? {
            LineItemState::Pending => {}
            // Already started (or done): nothing more to do.
            LineItemState::Preparing | LineItemState::Ready => return Ok(vec![]),
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::ItemPreparationStarted,
            EventPayload::ItemPreparationStarted {
                line_id: self.line_id.clone(),
            },
        );

        Ok(vec![event])
    }
}

/// FinishItemPreparation action
#[derive(Debug, Clone)]
pub struct FinishItemPreparationAction {
    pub order_id: String,
    pub line_id: String,
}

impl CommandHandler for FinishItemPreparationAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        require_staff(&metadata.actor, SECTOR_ROLES, "finish item preparation")?;

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        match preparation_guard(&snapshot, &self.line_id, "finish preparation for")? {
            LineItemState::Pending | LineItemState::Preparing => {}
            LineItemState::Ready => return Ok(vec![]),
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::ItemReady,
            EventPayload::ItemReady {
                line_id: self.line_id.clone(),
            },
        );

        Ok(vec![event])
    }
}
