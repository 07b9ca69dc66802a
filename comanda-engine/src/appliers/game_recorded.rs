//! GameAttemptRecorded event applier
//!
//! Ineligible attempts leave the totals alone; an eligible win writes the
//! discount onto the order and recomputes the totals.

use super::touch;
use crate::money;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// GameAttemptRecorded applier
pub struct GameAttemptRecordedApplier;

impl EventApplier for GameAttemptRecordedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::GameAttemptRecorded {
            discount_granted, ..
        } = &event.payload
        {
            if *discount_granted > 0.0 {
                snapshot.discount = *discount_granted;
                money::recalculate_totals(snapshot);
            }
            touch(snapshot, event);
        }
    }
}
