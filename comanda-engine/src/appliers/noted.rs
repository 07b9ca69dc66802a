//! Appliers for state-neutral events
//!
//! Bill requests and waiter calls change no order state; they exist for
//! the audit stream and for notification fan-out. Only the bookkeeping
//! fields move.

use super::touch;
use crate::traits::EventApplier;
use shared::order::{EventPayload, OrderEvent, OrderSnapshot};

/// BillRequested applier
pub struct BillRequestedApplier;

impl EventApplier for BillRequestedApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::BillRequested {} = &event.payload {
            touch(snapshot, event);
        }
    }
}

/// WaiterCalled applier
pub struct WaiterCalledApplier;

impl EventApplier for WaiterCalledApplier {
    fn apply(&self, snapshot: &mut OrderSnapshot, event: &OrderEvent) {
        if let EventPayload::WaiterCalled {} = &event.payload {
            touch(snapshot, event);
        }
    }
}
