//! Order Lifecycle Module
//!
//! This module provides the vocabulary of the order state machine:
//! - Commands: requests from clients to transition an order
//! - Events: immutable facts recorded after command processing
//! - Snapshots: computed order state from the event stream

pub mod command;
pub mod event;
pub mod snapshot;
pub mod state;
pub mod types;

// Re-exports
pub use command::{CartLineInput, OrderCommand, OrderCommandPayload};
pub use event::{EventPayload, OrderEvent, OrderEventType};
pub use snapshot::{LineItem, OrderChannel, OrderSnapshot};
pub use state::{LineItemState, OrderState};
pub use types::{CommandError, CommandErrorCode, CommandResponse};
