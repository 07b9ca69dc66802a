//! RecordGameAttempt command handler
//!
//! Every attempt is recorded for analytics. The discount is granted only
//! when no prior attempt exists for the (order, customer) pair and the
//! current attempt was won on the first try. The prior-attempt check goes
//! to storage, not an in-memory flag, since the game UI may be re-entered.

use tracing::info;

use crate::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::models::customer::CustomerRef;
use shared::models::game::GameKind;
use shared::order::{EventPayload, OrderEvent, OrderEventType};

/// RecordGameAttempt action
#[derive(Debug, Clone)]
pub struct RecordGameAttemptAction {
    pub order_id: String,
    pub customer: CustomerRef,
    pub game: GameKind,
    pub won: bool,
    pub attempt_number: u32,
}

impl CommandHandler for RecordGameAttemptAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        if let Some(actor_customer) = metadata.actor.customer()
            && actor_customer != &self.customer
        {
            return Err(OrderError::RoleNotAllowed("record a game for another customer"));
        }
        if self.attempt_number == 0 {
            return Err(OrderError::InvalidOperation(
                "attempt_number starts at 1".to_string(),
            ));
        }

        let snapshot = ctx.load_snapshot(&self.order_id)?;
        if !snapshot.is_active() {
            return Err(OrderError::InvalidTransition {
                from: snapshot.state,
                action: "record a game for",
            });
        }

        let prior = ctx.prior_game_result(&self.order_id, &self.customer)?;
        let eligible = prior.is_none() && self.won && self.attempt_number == 1;
        let discount_granted = if eligible { self.game.discount() } else { 0.0 };

        if eligible {
            info!(
                order_id = %self.order_id,
                customer = %self.customer,
                game = ?self.game,
                discount = discount_granted,
                "Game discount granted"
            );
        }

        let seq = ctx.next_sequence();
        let event = OrderEvent::new(
            seq,
            self.order_id.clone(),
            metadata.actor.id().to_string(),
            metadata.actor.name().to_string(),
            metadata.command_id.clone(),
            OrderEventType::GameAttemptRecorded,
            EventPayload::GameAttemptRecorded {
                customer: self.customer.clone(),
                game: self.game,
                won: self.won,
                attempt_number: self.attempt_number,
                discount_granted,
            },
        );

        Ok(vec![event])
    }
}
