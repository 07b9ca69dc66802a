//! Line-item event appliers
//!
//! Both re-derive the order-level `Preparing`/`Ready` edge after touching
//! the item, so the aggregate invariant holds after every item change.

use super::touch;
use crate::traits::EventApplier;
use shared::order::state::LineItemState;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// ItemPreparationStarted applier
pub struct ItemPreparationStartedApplier;

impl EventApplier for ItemPreparationStartedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemPreparationStarted { line_id } = &event.payload {
            if let Some(line) = snapshot.line_mut(line_id) {
                line.state = LineItemState::Preparing;
            }
            snapshot.refresh_progress();
            touch(snapshot, event);
        }
    }
}

/// ItemReady applier
pub struct ItemReadyApplier;

impl EventApplier for ItemReadyApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::ItemReady { line_id } = &event.payload {
            if let Some(line) = snapshot.line_mut(line_id) {
                line.state = LineItemState::Ready;
            }
            snapshot.refresh_progress();
            touch(snapshot, event);
        }
    }
}
